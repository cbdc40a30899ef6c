#![allow(dead_code)]

use std::sync::Arc;

use encounter_core::models::code::{Code, CodeId};
use encounter_core::models::modifier::{Modifier, ModifierId, ModifierType};
use encounter_pricing::{PriceRule, Pricer, RuleTable};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn modifier(id: u64, amount: Decimal, modifier_type: &str) -> Modifier {
    Modifier {
        id: ModifierId(id),
        amount,
        modifier_type: ModifierType::new(modifier_type),
        modifier_code: format!("M{id}"),
        start_date: None,
        end_date: None,
    }
}

pub fn code(id: u64, amount: Decimal, modifiers: Vec<Modifier>) -> Arc<Code> {
    Arc::new(Code {
        id: CodeId(id),
        code: format!("C{id}"),
        description: format!("procedure {id}"),
        amount,
        start_date: None,
        end_date: None,
        modifiers,
    })
}

/// Base 100 with an additive discount, an additive surcharge, a percentage,
/// a multiplier, an override, and an excluded LMTS modifier.
pub fn office_visit() -> Arc<Code> {
    code(
        1,
        dec!(100),
        vec![
            modifier(1, dec!(-10), "ADJ"),
            modifier(2, dec!(5), "ADJ"),
            modifier(3, dec!(50), "PCT"),
            modifier(4, dec!(2), "MULT"),
            modifier(5, dec!(30), "FLAT"),
            modifier(6, dec!(1000), "LMTS"),
        ],
    )
}

pub fn pricer() -> Pricer {
    Pricer::new(
        RuleTable::default()
            .with_rule("ADJ", PriceRule::Additive)
            .with_rule("PCT", PriceRule::Percentage)
            .with_rule("MULT", PriceRule::Multiplier)
            .with_rule("FLAT", PriceRule::Override),
    )
}
