use crate::core::libguides::query::QueryInput;
use crate::core::libguides::ParamBag;
use crate::domain::model::{Fine, Holding, PatronCredentials, PatronRequest, Profile};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Operations the discovery layer expects from an integrated library system.
#[async_trait]
pub trait IlsDriver: Send + Sync {
    async fn get_holding(
        &self,
        id: &str,
        patron: Option<&PatronCredentials>,
    ) -> Result<Vec<Holding>>;

    /// `Ok(None)` means the credentials were rejected.
    async fn patron_login(&self, barcode: &str, password: &str)
        -> Result<Option<PatronCredentials>>;

    async fn get_my_profile(&self, patron: &PatronCredentials) -> Result<Profile>;

    async fn get_my_fines(&self, patron: &PatronCredentials) -> Result<Vec<Fine>>;

    async fn get_my_holds(&self, patron: &PatronCredentials) -> Result<Vec<PatronRequest>>;

    async fn get_my_storage_retrieval_requests(
        &self,
        patron: &PatronCredentials,
    ) -> Result<Vec<PatronRequest>>;

    async fn get_my_ill_requests(&self, patron: &PatronCredentials)
        -> Result<Vec<PatronRequest>>;
}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    type Collection: Send;

    fn identifier(&self) -> &str;

    async fn search(
        &self,
        query: &QueryInput,
        offset: usize,
        limit: usize,
        params: Option<ParamBag>,
    ) -> Result<Self::Collection>;

    async fn retrieve(&self, id: &str, params: Option<ParamBag>) -> Result<Self::Collection>;
}
