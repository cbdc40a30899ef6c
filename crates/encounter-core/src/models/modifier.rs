use std::fmt;

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::validity::is_effective_on;

/// Catalog identifier of a modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ModifierId(#[ts(type = "number")] pub u64);

impl fmt::Display for ModifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category tag attached to a modifier by the catalog.
///
/// Kept as the raw tag the catalog emits so that unknown categories survive
/// a round trip; the pricing engine decides what each tag means.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ModifierType(String);

impl ModifierType {
    /// Tag of the excluded category. Never user-selectable.
    pub const LMTS: &'static str = "LMTS";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_excluded(&self) -> bool {
        self.0 == Self::LMTS
    }
}

impl fmt::Display for ModifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModifierType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// A price adjustment that may be attached to a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Modifier {
    pub id: ModifierId,
    /// Signed adjustment or factor; how it applies depends on `modifier_type`.
    #[ts(type = "string")]
    pub amount: Decimal,
    pub modifier_type: ModifierType,
    /// Short display code, e.g. "25".
    pub modifier_code: String,
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
}

impl Modifier {
    pub fn is_excluded(&self) -> bool {
        self.modifier_type.is_excluded()
    }

    pub fn is_effective_on(&self, date: Date) -> bool {
        is_effective_on(self.start_date, self.end_date, date)
    }
}
