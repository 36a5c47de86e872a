pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::catalog_service::{CatalogError, CatalogService};
pub use domain::catalog::{Gender, Movie, Person, PersonRole};
pub use storage::{CatalogStore, MemoryCatalogStore, PgCatalogStore};
