//! encounter-catalog
//!
//! Loads the code catalog the pricing engine works against. The catalog is
//! read once, before any encounter exists, from a JSON file or from the
//! upstream catalog service.

pub mod error;
pub mod file;
pub mod http;
pub mod parse;

use encounter_core::catalog::Catalog;

use crate::error::CatalogError;

pub use file::FileCatalog;
pub use http::HttpCatalog;
pub use parse::parse_catalog;

/// Somewhere a catalog snapshot can be loaded from.
pub trait CatalogSource: Send + Sync {
    /// Short description for logs (a path or URL).
    fn describe(&self) -> String;

    fn load(&self) -> Result<Catalog, CatalogError>;
}
