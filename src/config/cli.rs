use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "catalog-bridge")]
#[command(about = "Query the Alma ILS and LibGuides from the command line")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "catalog-bridge.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Ils(IlsCommand),

    /// Search LibGuides
    Guides {
        #[arg(default_value = "")]
        query: String,

        #[arg(long, default_value = "0")]
        offset: usize,

        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum IlsCommand {
    /// Holdings of a bibliographic record
    Holding { id: String },

    /// Authenticate a patron
    Login { barcode: String, password: String },

    /// Patron profile
    Profile(PatronArgs),

    /// Patron fines
    Fines(PatronArgs),

    /// Patron holds
    Holds(PatronArgs),

    /// Patron storage retrieval requests
    StorageRequests(PatronArgs),

    /// Patron interlibrary loan requests
    IllRequests(PatronArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct PatronArgs {
    /// Patron barcode (cat_username)
    pub username: String,

    #[arg(long, default_value = "")]
    pub password: String,
}

impl PatronArgs {
    pub fn credentials(&self) -> crate::domain::model::PatronCredentials {
        crate::domain::model::PatronCredentials {
            cat_username: self.username.trim().to_string(),
            cat_password: self.password.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_holding_command() {
        let args = CliArgs::parse_from(["catalog-bridge", "-c", "alma.toml", "holding", "991234"]);
        assert_eq!(args.config, "alma.toml");
        assert!(matches!(
            args.command,
            Command::Ils(IlsCommand::Holding { ref id }) if id == "991234"
        ));
    }

    #[test]
    fn test_parse_patron_command() {
        let args = CliArgs::parse_from(["catalog-bridge", "fines", " 12345 "]);
        match args.command {
            Command::Ils(IlsCommand::Fines(patron)) => {
                assert_eq!(patron.credentials().cat_username, "12345");
                assert_eq!(patron.credentials().cat_password, "");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_guides_defaults() {
        let args = CliArgs::parse_from(["catalog-bridge", "-v", "guides", "maps"]);
        assert!(args.verbose);
        match args.command {
            Command::Guides { query, offset, limit } => {
                assert_eq!(query, "maps");
                assert_eq!(offset, 0);
                assert_eq!(limit, 20);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
