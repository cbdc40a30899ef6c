use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use encounter_core::models::code::{Code, CodeId};
use encounter_core::models::modifier::{Modifier, ModifierId, ModifierType};

use crate::rules::{PriceRule, RuleTable};

/// Something a pricing run wants surfaced without failing the price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum PricingWarning {
    /// No rule is configured for this type; the fallback rule was applied.
    UnrecognizedModifierType {
        modifier_id: ModifierId,
        modifier_type: ModifierType,
        fallback: PriceRule,
    },
    /// The adjustment overflowed; the running price was carried forward unchanged.
    Overflow { modifier_id: ModifierId },
    /// The computed price was below the configured floor and was raised to it.
    FloorApplied {
        #[ts(type = "string")]
        computed: Decimal,
        #[ts(type = "string")]
        floor: Decimal,
    },
}

/// One modifier's effect on the running price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceStep {
    pub modifier_id: ModifierId,
    pub modifier_code: String,
    pub rule: PriceRule,
    #[ts(type = "string")]
    pub amount: Decimal,
    #[ts(type = "string")]
    pub before: Decimal,
    #[ts(type = "string")]
    pub after: Decimal,
}

/// Full trace of a price computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceBreakdown {
    pub code_id: CodeId,
    #[ts(type = "string")]
    pub base: Decimal,
    pub steps: Vec<PriceStep>,
    #[ts(type = "string")]
    pub price: Decimal,
    pub warnings: Vec<PricingWarning>,
}

/// Computes a code's effective price from its ordered modifiers.
///
/// Modifiers are folded left to right over the code's base amount, each one
/// adjusting the *running* price, so the order of the slots matters.
/// Negative results are returned as-is unless a `floor` is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pricer {
    rules: RuleTable,
    floor: Option<Decimal>,
}

impl Pricer {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules, floor: None }
    }

    /// Never return a price below `floor`.
    pub fn with_floor(mut self, floor: Decimal) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn floor(&self) -> Option<Decimal> {
        self.floor
    }

    pub fn compute_price(&self, code: &Code, modifiers: &[Modifier]) -> Decimal {
        self.price_breakdown(code, modifiers).price
    }

    pub fn price_breakdown(&self, code: &Code, modifiers: &[Modifier]) -> PriceBreakdown {
        let mut running = code.amount;
        let mut steps = Vec::with_capacity(modifiers.len());
        let mut warnings = Vec::new();

        for modifier in modifiers {
            let lookup = self.rules.rule_for(&modifier.modifier_type);
            if !lookup.recognized {
                tracing::warn!(
                    code_id = %code.id,
                    modifier_id = %modifier.id,
                    modifier_type = %modifier.modifier_type,
                    fallback = ?lookup.rule,
                    "unrecognized modifier type, applying fallback rule"
                );
                warnings.push(PricingWarning::UnrecognizedModifierType {
                    modifier_id: modifier.id,
                    modifier_type: modifier.modifier_type.clone(),
                    fallback: lookup.rule,
                });
            }

            let after = match lookup.rule.apply(running, modifier.amount) {
                Some(after) => after,
                None => {
                    tracing::warn!(
                        code_id = %code.id,
                        modifier_id = %modifier.id,
                        "modifier adjustment overflowed, skipping"
                    );
                    warnings.push(PricingWarning::Overflow {
                        modifier_id: modifier.id,
                    });
                    running
                }
            };

            steps.push(PriceStep {
                modifier_id: modifier.id,
                modifier_code: modifier.modifier_code.clone(),
                rule: lookup.rule,
                amount: modifier.amount,
                before: running,
                after,
            });
            running = after;
        }

        if let Some(floor) = self.floor
            && running < floor
        {
            tracing::warn!(code_id = %code.id, computed = %running, %floor, "price raised to floor");
            warnings.push(PricingWarning::FloorApplied {
                computed: running,
                floor,
            });
            running = floor;
        }

        tracing::debug!(code_id = %code.id, modifiers = modifiers.len(), price = %running, "price computed");

        PriceBreakdown {
            code_id: code.id,
            base: code.amount,
            steps,
            price: running,
            warnings,
        }
    }
}
