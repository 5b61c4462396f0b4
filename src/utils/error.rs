use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("XML decoding error: {0}")]
    XmlError(#[from] quick_xml::DeError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API returned HTTP {status} for {url}")]
    ApiStatusError {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{backend} backend error: {message}")]
    BackendError { backend: String, message: String },

    #[error("{operation} is not supported by {backend}")]
    UnsupportedOperation { backend: String, operation: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Api,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::HttpError(_) => ErrorCategory::Network,
            CatalogError::ApiStatusError { .. }
            | CatalogError::BackendError { .. }
            | CatalogError::UnsupportedOperation { .. } => ErrorCategory::Api,
            CatalogError::XmlError(_)
            | CatalogError::SerializationError(_) => ErrorCategory::Data,
            CatalogError::ConfigError { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::MissingConfigError { .. }
            | CatalogError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CatalogError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CatalogError::UnsupportedOperation { .. } => ErrorSeverity::Low,
            CatalogError::HttpError(_)
            | CatalogError::BackendError { .. } => ErrorSeverity::Medium,
            CatalogError::ApiStatusError { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            CatalogError::ApiStatusError { .. }
            | CatalogError::XmlError(_)
            | CatalogError::SerializationError(_) => ErrorSeverity::High,
            CatalogError::ConfigError { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::MissingConfigError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 依錯誤類別提供修復建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            CatalogError::HttpError(_) => {
                "Check network connectivity and the configured API base URL".to_string()
            }
            CatalogError::ApiStatusError { status, .. } => match status {
                401 | 403 => "Verify the API key and its permissions".to_string(),
                404 => "Verify the requested record or patron identifier".to_string(),
                s if *s >= 500 => "The remote service is failing, retry later".to_string(),
                _ => "Inspect the API response body in the logs".to_string(),
            },
            CatalogError::XmlError(_) | CatalogError::SerializationError(_) => {
                "The remote service returned an unexpected document format".to_string()
            }
            CatalogError::ConfigError { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::MissingConfigError { .. }
            | CatalogError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and try again".to_string()
            }
            CatalogError::BackendError { backend, .. } => {
                format!("Check the {} backend settings and availability", backend)
            }
            CatalogError::UnsupportedOperation { .. } => {
                "Use an operation supported by this backend".to_string()
            }
            CatalogError::IoError(_) => "Check file paths and permissions".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the remote service: {}", self),
            ErrorCategory::Api => format!("The remote service rejected the request: {}", self),
            ErrorCategory::Data => format!("Could not read the remote response: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
