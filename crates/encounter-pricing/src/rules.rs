use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use encounter_core::models::modifier::ModifierType;

/// How a modifier's `amount` adjusts the running price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PriceRule {
    /// `price + amount`.
    Additive,
    /// `price + price * amount / 100`; `amount` is a signed percentage.
    Percentage,
    /// `price * amount`.
    Multiplier,
    /// `amount` replaces the running price.
    Override,
}

impl PriceRule {
    /// Apply this rule to `price`. `None` on decimal overflow.
    pub fn apply(self, price: Decimal, amount: Decimal) -> Option<Decimal> {
        match self {
            PriceRule::Additive => price.checked_add(amount),
            PriceRule::Percentage => price
                .checked_mul(amount)
                .and_then(|delta| delta.checked_div(Decimal::ONE_HUNDRED))
                .and_then(|delta| price.checked_add(delta)),
            PriceRule::Multiplier => price.checked_mul(amount),
            PriceRule::Override => Some(amount),
        }
    }
}

/// Result of looking up the rule for a modifier type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleLookup {
    pub rule: PriceRule,
    /// False when the type had no entry and the fallback was used.
    pub recognized: bool,
}

/// Total mapping from modifier type tags to arithmetic rules.
///
/// Every tag resolves to exactly one rule: listed tags to their entry,
/// everything else to `fallback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    #[serde(default)]
    rules: BTreeMap<String, PriceRule>,
    #[serde(default = "default_fallback")]
    fallback: PriceRule,
}

fn default_fallback() -> PriceRule {
    PriceRule::Additive
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            rules: BTreeMap::new(),
            fallback: default_fallback(),
        }
    }
}

impl RuleTable {
    pub fn new(fallback: PriceRule) -> Self {
        Self {
            rules: BTreeMap::new(),
            fallback,
        }
    }

    /// Map `tag` to `rule`, replacing any earlier entry.
    pub fn with_rule(mut self, tag: impl Into<String>, rule: PriceRule) -> Self {
        self.rules.insert(tag.into(), rule);
        self
    }

    pub fn fallback(&self) -> PriceRule {
        self.fallback
    }

    pub fn rules(&self) -> &BTreeMap<String, PriceRule> {
        &self.rules
    }

    pub fn rule_for(&self, modifier_type: &ModifierType) -> RuleLookup {
        match self.rules.get(modifier_type.as_str()) {
            Some(&rule) => RuleLookup {
                rule,
                recognized: true,
            },
            None => RuleLookup {
                rule: self.fallback,
                recognized: false,
            },
        }
    }
}
