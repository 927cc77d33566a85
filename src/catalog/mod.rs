pub mod glue;
pub mod manager;
pub mod mock_catalog;

pub use glue::GlueCatalog;
pub use manager::{CatalogEntry, CatalogError, CatalogManager, RegisterOutcome};
pub use mock_catalog::MockCatalog;
