use encounter_core::catalog::Catalog;
use encounter_core::models::code::Code;
use serde_json::Value;

use crate::error::CatalogError;

/// Parse a catalog document.
///
/// The upstream `GET /code` endpoint returns a single code object, while
/// `GET /codes` and catalog files hold an array. Both shapes are accepted.
pub fn parse_catalog(bytes: &[u8]) -> Result<Catalog, CatalogError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let codes: Vec<Code> = match value {
        Value::Array(_) => serde_json::from_value(value)?,
        other => vec![serde_json::from_value(other)?],
    };
    Ok(Catalog::new(codes)?)
}
