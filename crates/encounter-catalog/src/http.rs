use encounter_core::catalog::Catalog;

use crate::CatalogSource;
use crate::error::CatalogError;
use crate::parse::parse_catalog;

/// The upstream catalog service.
///
/// Tries `GET {base}/codes` first. Older deployments only expose
/// `GET {base}/code`, returning a single code; a 404 on `/codes` falls back
/// to it.
pub struct HttpCatalog {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    fn fetch(&self, path: &str) -> Result<Vec<u8>, CatalogError> {
        let url = format!("{}{path}", self.base_url);
        let mut response = self.agent.get(&url).call().map_err(|e| match e {
            ureq::Error::StatusCode(status) => CatalogError::Status {
                url: url.clone(),
                status,
            },
            other => CatalogError::Http {
                url: url.clone(),
                message: other.to_string(),
            },
        })?;

        response
            .body_mut()
            .read_to_vec()
            .map_err(|e| CatalogError::Http {
                url,
                message: e.to_string(),
            })
    }
}

impl CatalogSource for HttpCatalog {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    fn load(&self) -> Result<Catalog, CatalogError> {
        let body = match self.fetch("/codes") {
            Ok(body) => body,
            Err(CatalogError::Status { status: 404, .. }) => {
                tracing::info!(base_url = %self.base_url, "no /codes endpoint, falling back to /code");
                self.fetch("/code")?
            }
            Err(e) => return Err(e),
        };

        let catalog = parse_catalog(&body)?;
        tracing::info!(base_url = %self.base_url, codes = catalog.len(), "catalog fetched");
        Ok(catalog)
    }
}
