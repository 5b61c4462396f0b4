use crate::config::AppConfig;
use crate::core::alma::AlmaDriver;
use crate::domain::ports::IlsDriver;
use crate::utils::error::{CatalogError, Result};
use reqwest::Client;
use std::time::Duration;

/// Build the ILS driver named in `catalog.driver` (defaults to Alma).
pub fn create_ils_driver(config: &AppConfig) -> Result<Box<dyn IlsDriver>> {
    let catalog = config.catalog()?;

    match catalog.driver_name() {
        "Alma" | "alma" => {
            let client = Client::builder()
                .timeout(Duration::from_secs(catalog.timeout_seconds()))
                .build()?;
            Ok(Box::new(AlmaDriver::init(config, client)?))
        }
        other => Err(CatalogError::InvalidConfigValueError {
            field: "catalog.driver".to_string(),
            value: other.to_string(),
            reason: "Supported drivers: Alma".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_alma_driver() {
        let config = AppConfig::from_toml_str(
            "[catalog]\napi_base_url = \"https://alma.example.org/almaws/v1\"\napi_key = \"k\"\n",
        )
        .unwrap();
        assert!(create_ils_driver(&config).is_ok());
    }

    #[test]
    fn test_unknown_driver() {
        let config = AppConfig::from_toml_str(
            "[catalog]\ndriver = \"Voyager\"\napi_base_url = \"https://ils.example.org\"\napi_key = \"k\"\n",
        )
        .unwrap();
        assert!(matches!(
            create_ils_driver(&config),
            Err(CatalogError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_missing_catalog() {
        assert!(create_ils_driver(&AppConfig::default()).is_err());
    }
}
