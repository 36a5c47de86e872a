pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;
pub use store::CatalogStore;

use thiserror::Error;

/// Failures surfaced by a catalog store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("storage backend failure: {0}")]
    Backend(String),
}
