use std::path::PathBuf;

use encounter_core::catalog::Catalog;

use crate::CatalogSource;
use crate::error::CatalogError;
use crate::parse::parse_catalog;

/// A catalog stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalog {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Catalog, CatalogError> {
        let bytes = std::fs::read(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let catalog = parse_catalog(&bytes)?;
        tracing::info!(path = %self.path.display(), codes = catalog.len(), "catalog loaded from file");
        Ok(catalog)
    }
}
