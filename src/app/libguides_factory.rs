use crate::config::{AppConfig, LibGuidesGeneral};
use crate::core::libguides::{
    Backend, Connector, LibGuidesRecord, QueryBuilder, RecordCollectionFactory, SOURCE_IDENTIFIER,
};
use crate::domain::ports::SearchBackend;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use reqwest::Client;
use std::time::Duration;

pub trait BackendFactory {
    type Backend: SearchBackend;

    fn create(&self, config: &AppConfig) -> Result<Self::Backend>;
}

/// Assembles a LibGuides backend from the `[libguides.general]` settings.
#[derive(Debug, Clone, Default)]
pub struct LibGuidesBackendFactory;

impl LibGuidesBackendFactory {
    pub fn new() -> Self {
        Self
    }

    fn create_connector(&self, general: &LibGuidesGeneral) -> Result<Connector> {
        let client = Client::builder()
            .timeout(Duration::from_secs(general.timeout()))
            .build()?;

        tracing::debug!(
            "LibGuides connector: iid={:?} version={} timeout={}s",
            general.iid,
            general.version(),
            general.timeout()
        );
        Ok(Connector::new(general.iid, client, general.version()).with_host(general.host()))
    }

    fn create_query_builder(&self) -> QueryBuilder {
        QueryBuilder::new()
    }

    fn create_record_collection_factory(&self) -> RecordCollectionFactory<LibGuidesRecord> {
        RecordCollectionFactory::new(LibGuidesRecord::from_raw)
    }

    fn create_backend(&self, connector: Connector, general: &LibGuidesGeneral) -> Backend {
        let mut backend = Backend::new(
            connector,
            self.create_record_collection_factory(),
            general.default_search.clone(),
        );
        backend.set_query_builder(self.create_query_builder());
        backend
    }
}

impl BackendFactory for LibGuidesBackendFactory {
    type Backend = Backend;

    fn create(&self, config: &AppConfig) -> Result<Backend> {
        let general = config.libguides_general();
        general.validate()?;

        let connector = self.create_connector(&general)?;
        let backend = self.create_backend(connector, &general);
        tracing::info!("🔧 {} backend ready", SOURCE_IDENTIFIER);
        Ok(backend)
    }
}

/// 依名稱建立搜尋 backend
pub fn create_backend(name: &str, config: &AppConfig) -> Result<Backend> {
    match name {
        n if n.eq_ignore_ascii_case(SOURCE_IDENTIFIER) => LibGuidesBackendFactory::new().create(config),
        other => Err(CatalogError::ConfigError {
            message: format!("Unknown search backend: {}", other),
        }),
    }
}
