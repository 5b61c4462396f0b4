pub mod ils_factory;
pub mod libguides_factory;

pub use ils_factory::create_ils_driver;
pub use libguides_factory::{create_backend, BackendFactory, LibGuidesBackendFactory};
