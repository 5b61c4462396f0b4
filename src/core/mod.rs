pub mod alma;
pub mod libguides;

pub use crate::domain::model::{Fine, Holding, PatronCredentials, PatronRequest, Profile};
pub use crate::domain::ports::{IlsDriver, SearchBackend};
pub use crate::utils::error::Result;
