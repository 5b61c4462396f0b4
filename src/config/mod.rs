#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::dates::{is_valid_display_format, DEFAULT_DISPLAY_FORMAT};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_LIBGUIDES_HOST: &str = "http://api.libguides.com/api_search.php";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub catalog: Option<CatalogConfig>,
    pub libguides: Option<LibGuidesConfig>,
    pub logging: Option<LoggingConfig>,
}

/// ILS 連線設定（對應 `[catalog]` 區段）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub driver: Option<String>,
    #[serde(alias = "apiBaseUrl")]
    pub api_base_url: String,
    #[serde(alias = "apiKey")]
    pub api_key: String,
    pub display_date_format: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibGuidesConfig {
    #[serde(default, alias = "General")]
    pub general: LibGuidesGeneral,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibGuidesGeneral {
    pub iid: Option<u64>,
    pub version: Option<u8>,
    pub timeout: Option<u64>,
    #[serde(alias = "defaultSearch")]
    pub default_search: Option<String>,
    pub host: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ALMA_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn catalog(&self) -> Result<&CatalogConfig> {
        validate_required_field("catalog", &self.catalog)
    }

    pub fn libguides_general(&self) -> LibGuidesGeneral {
        self.libguides
            .as_ref()
            .map(|l| l.general.clone())
            .unwrap_or_default()
    }

    pub fn wants_json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}

impl CatalogConfig {
    pub fn driver_name(&self) -> &str {
        self.driver.as_deref().unwrap_or("Alma")
    }

    pub fn display_date_format(&self) -> &str {
        self.display_date_format
            .as_deref()
            .unwrap_or(DEFAULT_DISPLAY_FORMAT)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl LibGuidesGeneral {
    pub fn version(&self) -> u8 {
        self.version.unwrap_or(1)
    }

    pub fn timeout(&self) -> u64 {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_LIBGUIDES_HOST)
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        validate_url("catalog.api_base_url", &self.api_base_url)?;
        validate_non_empty_string("catalog.api_key", &self.api_key)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("catalog.timeout_seconds", timeout, 1, 600)?;
        }
        if !is_valid_display_format(self.display_date_format()) {
            return Err(CatalogError::InvalidConfigValueError {
                field: "catalog.display_date_format".to_string(),
                value: self.display_date_format().to_string(),
                reason: "not a valid strftime format".to_string(),
            });
        }
        Ok(())
    }
}

impl Validate for LibGuidesGeneral {
    fn validate(&self) -> Result<()> {
        validate_range("libguides.general.version", self.version(), 1, 2)?;
        validate_range("libguides.general.timeout", self.timeout(), 1, 600)?;
        validate_url("libguides.general.host", self.host())?;
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if let Some(catalog) = &self.catalog {
            catalog.validate()?;
        }
        if let Some(libguides) = &self.libguides {
            libguides.general.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[catalog]
driver = "Alma"
api_base_url = "https://api-eu.hosted.exlibrisgroup.com/almaws/v1"
api_key = "l7xx123"
display_date_format = "%d.%m.%Y"

[libguides.general]
iid = 1234
version = 2
timeout = 10
default_search = "history"

[logging]
format = "json"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.driver_name(), "Alma");
        assert_eq!(catalog.api_key, "l7xx123");
        assert_eq!(catalog.display_date_format(), "%d.%m.%Y");
        assert_eq!(catalog.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);

        let general = config.libguides_general();
        assert_eq!(general.iid, Some(1234));
        assert_eq!(general.version(), 2);
        assert_eq!(general.timeout(), 10);
        assert_eq!(general.default_search.as_deref(), Some("history"));
        assert_eq!(general.host(), DEFAULT_LIBGUIDES_HOST);

        assert!(config.wants_json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_camel_case_keys_are_accepted() {
        let toml_content = r#"
[catalog]
apiBaseUrl = "https://alma.example.org/almaws/v1"
apiKey = "secret"

[libguides.General]
defaultSearch = "maps"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.catalog().unwrap().api_base_url,
            "https://alma.example.org/almaws/v1"
        );
        assert_eq!(
            config.libguides_general().default_search.as_deref(),
            Some("maps")
        );
    }

    #[test]
    fn test_missing_catalog_section() {
        let config = AppConfig::from_toml_str("[logging]\nformat = \"compact\"\n").unwrap();
        assert!(matches!(
            config.catalog(),
            Err(CatalogError::MissingConfigError { .. })
        ));
        assert!(!config.wants_json_logs());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CATALOG_BRIDGE_TEST_KEY", "from-env");
        let toml_content = r#"
[catalog]
api_base_url = "https://alma.example.org/almaws/v1"
api_key = "${CATALOG_BRIDGE_TEST_KEY}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.catalog().unwrap().api_key, "from-env");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let toml_content = r#"
[catalog]
api_base_url = "https://alma.example.org/almaws/v1"
api_key = "${CATALOG_BRIDGE_SURELY_UNSET_VAR}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.catalog().unwrap().api_key,
            "${CATALOG_BRIDGE_SURELY_UNSET_VAR}"
        );
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad_url = AppConfig::from_toml_str(
            "[catalog]\napi_base_url = \"not a url\"\napi_key = \"k\"\n",
        )
        .unwrap();
        assert!(bad_url.validate().is_err());

        let bad_version = AppConfig::from_toml_str("[libguides.general]\nversion = 7\n").unwrap();
        assert!(bad_version.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_date_format() {
        let config = AppConfig::from_toml_str(
            "[catalog]\napi_base_url = \"https://alma.example.org/almaws/v1\"\napi_key = \"k\"\ndisplay_date_format = \"%Q\"\n",
        )
        .unwrap();

        match config.validate() {
            Err(CatalogError::InvalidConfigValueError { field, value, .. }) => {
                assert_eq!(field, "catalog.display_date_format");
                assert_eq!(value, "%Q");
            }
            other => panic!("expected InvalidConfigValueError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toml() {
        let result = AppConfig::from_toml_str("[catalog\napi_key = ");
        assert!(matches!(
            result,
            Err(CatalogError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[catalog]\napi_base_url = \"https://alma.example.org/almaws/v1\"\napi_key = \"file-key\""
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.catalog().unwrap().api_key, "file-key");
    }
}
