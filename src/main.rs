use anyhow::Context;
use catalog_bridge::config::cli::{Command, IlsCommand};
use catalog_bridge::core::libguides::QueryInput;
use catalog_bridge::utils::error::ErrorSeverity;
use catalog_bridge::utils::{logger, validation::Validate};
use catalog_bridge::{
    create_backend, create_ils_driver, AppConfig, CliArgs, IlsDriver, SearchBackend,
};
use clap::Parser;

async fn run(command: &Command, config: &AppConfig) -> catalog_bridge::Result<serde_json::Value> {
    match command {
        Command::Guides { query, offset, limit } => {
            let backend = create_backend("LibGuides", config)?;
            let collection = backend
                .search(&QueryInput::simple(query.clone()), *offset, *limit, None)
                .await?;
            Ok(serde_json::to_value(&collection)?)
        }
        Command::Ils(ils_command) => {
            let driver = create_ils_driver(config)?;
            run_ils(ils_command, driver.as_ref()).await
        }
    }
}

async fn run_ils(
    command: &IlsCommand,
    driver: &dyn IlsDriver,
) -> catalog_bridge::Result<serde_json::Value> {
    let value = match command {
        IlsCommand::Holding { id } => serde_json::to_value(driver.get_holding(id, None).await?)?,
        IlsCommand::Login { barcode, password } => {
            serde_json::to_value(driver.patron_login(barcode, password).await?)?
        }
        IlsCommand::Profile(patron) => {
            serde_json::to_value(driver.get_my_profile(&patron.credentials()).await?)?
        }
        IlsCommand::Fines(patron) => {
            serde_json::to_value(driver.get_my_fines(&patron.credentials()).await?)?
        }
        IlsCommand::Holds(patron) => {
            serde_json::to_value(driver.get_my_holds(&patron.credentials()).await?)?
        }
        IlsCommand::StorageRequests(patron) => serde_json::to_value(
            driver
                .get_my_storage_retrieval_requests(&patron.credentials())
                .await?,
        )?,
        IlsCommand::IllRequests(patron) => {
            serde_json::to_value(driver.get_my_ill_requests(&patron.credentials()).await?)?
        }
    };
    Ok(value)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = AppConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    // 初始化日誌
    if config.wants_json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::debug!("CLI args: {:?}", args.command);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    match run(&args.command, &config).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 4,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
