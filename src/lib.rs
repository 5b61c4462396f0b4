pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliArgs;

pub use crate::app::{create_backend, create_ils_driver, LibGuidesBackendFactory};
pub use crate::config::AppConfig;
pub use crate::core::alma::AlmaDriver;
pub use crate::domain::ports::{IlsDriver, SearchBackend};
pub use crate::utils::error::{CatalogError, Result};
