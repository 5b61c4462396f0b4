use super::connector::Connector;
use super::query::{QueryBuilder, QueryInput};
use super::response::{LibGuidesRecord, RecordCollection, RecordCollectionFactory, RecordDriver};
use super::{ParamBag, SOURCE_IDENTIFIER};
use crate::domain::ports::SearchBackend;
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;

pub struct Backend<R = LibGuidesRecord> {
    connector: Connector,
    collection_factory: RecordCollectionFactory<R>,
    query_builder: QueryBuilder,
    default_search: Option<String>,
}

impl<R: RecordDriver> Backend<R> {
    pub fn new(
        connector: Connector,
        collection_factory: RecordCollectionFactory<R>,
        default_search: Option<String>,
    ) -> Self {
        Self {
            connector,
            collection_factory,
            query_builder: QueryBuilder::new(),
            default_search: default_search.filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn set_query_builder(&mut self, query_builder: QueryBuilder) {
        self.query_builder = query_builder;
    }

    pub fn query_builder(&self) -> &QueryBuilder {
        &self.query_builder
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    pub fn default_search(&self) -> Option<&str> {
        self.default_search.as_deref()
    }

    /// 組出送往 connector 的參數（含預設搜尋與分頁）
    pub fn build_params(
        &self,
        query: &QueryInput,
        offset: usize,
        limit: usize,
        params: Option<ParamBag>,
    ) -> ParamBag {
        let mut base = self.query_builder.build(query);
        if let Some(default_search) = &self.default_search {
            base.replace_empty("search", default_search);
        }
        if let Some(extra) = params {
            base.merge_with(extra);
        }

        let page = if limit == 0 { 1 } else { offset / limit + 1 };
        base.set("perpage", limit.to_string());
        base.set("page", page.to_string());
        base
    }
}

#[async_trait]
impl<R> SearchBackend for Backend<R>
where
    R: RecordDriver + Send + Sync + 'static,
{
    type Collection = RecordCollection<R>;

    fn identifier(&self) -> &str {
        SOURCE_IDENTIFIER
    }

    async fn search(
        &self,
        query: &QueryInput,
        offset: usize,
        limit: usize,
        params: Option<ParamBag>,
    ) -> Result<RecordCollection<R>> {
        let args = self.build_params(query, offset, limit, params);

        let response = self
            .connector
            .query(&args, offset, limit)
            .await
            .map_err(|e| {
                tracing::error!("❌ LibGuides search failed: {}", e);
                CatalogError::BackendError {
                    backend: SOURCE_IDENTIFIER.to_string(),
                    message: e.to_string(),
                }
            })?;

        let mut collection = self.collection_factory.factory(response, offset);
        collection.inject_source_identifier(self.identifier());
        tracing::info!(
            "🔍 LibGuides search returned {} of {} guides",
            collection.len(),
            collection.total()
        );
        Ok(collection)
    }

    async fn retrieve(&self, id: &str, _params: Option<ParamBag>) -> Result<RecordCollection<R>> {
        tracing::warn!("retrieve({}) requested from LibGuides", id);
        Err(CatalogError::UnsupportedOperation {
            backend: SOURCE_IDENTIFIER.to_string(),
            operation: "retrieve()".to_string(),
        })
    }
}
