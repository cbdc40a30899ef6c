use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use encounter_catalog::{CatalogSource, FileCatalog, HttpCatalog};
use encounter_pricing::{PriceRule, Pricer, RuleTable};

use crate::state::DEFAULT_MAX_SESSIONS;

/// Current pricing config version. Bump this when adding fields or changing
/// shape. Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Where the catalog comes from. A file wins over a URL when both are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    File(PathBuf),
    Url(String),
}

impl CatalogLocation {
    pub fn source(&self) -> Box<dyn CatalogSource> {
        match self {
            CatalogLocation::File(path) => Box::new(FileCatalog::new(path)),
            CatalogLocation::Url(url) => Box::new(HttpCatalog::new(url)),
        }
    }
}

/// Service configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub catalog: CatalogLocation,
    pub pricing_config: Option<PathBuf>,
    /// Open encounter sessions allowed at once.
    pub max_sessions: usize,
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let set = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let bind_addr = set("ENCOUNTER_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| eyre::eyre!("invalid ENCOUNTER_BIND_ADDR {bind_addr:?}: {e}"))?;

        let catalog = match (set("ENCOUNTER_CATALOG_PATH"), set("ENCOUNTER_CATALOG_URL")) {
            (Some(path), _) => CatalogLocation::File(PathBuf::from(path)),
            (None, Some(url)) => CatalogLocation::Url(url),
            (None, None) => {
                return Err(eyre::eyre!(
                    "no catalog configured: set ENCOUNTER_CATALOG_PATH or ENCOUNTER_CATALOG_URL"
                ));
            }
        };

        let max_sessions = match set("ENCOUNTER_MAX_SESSIONS") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    eyre::eyre!("invalid ENCOUNTER_MAX_SESSIONS {raw:?}: expected a positive integer")
                })?,
            None => DEFAULT_MAX_SESSIONS,
        };

        Ok(Self {
            bind_addr,
            catalog,
            pricing_config: set("ENCOUNTER_PRICING_CONFIG").map(PathBuf::from),
            max_sessions,
        })
    }

    /// The pricer described by the pricing config file, or the default
    /// (every type additive) when none is configured.
    pub fn pricer(&self) -> eyre::Result<Pricer> {
        match &self.pricing_config {
            Some(path) => Ok(load_pricing_config(path)?.into_pricer()),
            None => {
                tracing::warn!("no pricing config, every modifier type prices as additive");
                Ok(Pricer::default())
            }
        }
    }
}

/// On-disk pricing rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Arithmetic rule per modifier type tag.
    #[serde(default)]
    pub rules: BTreeMap<String, PriceRule>,
    /// Rule for tags not listed in `rules`.
    #[serde(default = "default_fallback")]
    pub fallback: PriceRule,
    /// Lowest price a line may have. `None` lets negative prices through.
    #[serde(default)]
    pub floor: Option<Decimal>,
}

fn default_fallback() -> PriceRule {
    PriceRule::Additive
}

impl PricingConfig {
    pub fn into_pricer(self) -> Pricer {
        let table = self
            .rules
            .into_iter()
            .fold(RuleTable::new(self.fallback), |table, (tag, rule)| {
                table.with_rule(tag, rule)
            });
        let pricer = Pricer::new(table);
        match self.floor {
            Some(floor) => pricer.with_floor(floor),
            None => pricer,
        }
    }
}

pub fn load_pricing_config(path: &Path) -> eyre::Result<PricingConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read pricing config at {}: {e}", path.display()))?;
    parse_pricing_config(&contents)
}

pub fn parse_pricing_config(contents: &str) -> eyre::Result<PricingConfig> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: PricingConfig = serde_json::from_value(migrated)?;
    tracing::info!(
        rules = config.rules.len(),
        fallback = ?config.fallback,
        floor = ?config.floor,
        "pricing config loaded"
    );
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 → v1: fallback was implicit; write it out as additive.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("pricing config is not a JSON object"))?;
        obj.entry("fallback")
            .or_insert(serde_json::Value::String("additive".to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated pricing config v0 → v1 (pinned fallback rule)");
    }

    Ok(json)
}
