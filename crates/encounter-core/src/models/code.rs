use std::fmt;

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::modifier::{Modifier, ModifierId};
use super::validity::is_effective_on;

/// Catalog identifier of a billable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct CodeId(#[ts(type = "number")] pub u64);

impl fmt::Display for CodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A billable procedure with its base price and the modifiers it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Code {
    pub id: CodeId,
    /// Short display code, e.g. "99213".
    pub code: String,
    pub description: String,
    /// Base price before any modifier is applied.
    #[ts(type = "string")]
    pub amount: Decimal,
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl Code {
    /// Look up one of this code's modifiers by id.
    pub fn modifier(&self, id: ModifierId) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.id == id)
    }

    pub fn is_effective_on(&self, date: Date) -> bool {
        is_effective_on(self.start_date, self.end_date, date)
    }
}
