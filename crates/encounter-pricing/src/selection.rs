use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use encounter_core::models::code::Code;
use encounter_core::models::modifier::Modifier;

use crate::calculator::Pricer;

/// A code on an encounter together with its chosen modifiers and price.
///
/// Only the [`validator`](crate::validator) produces modified selections, so
/// a `Selection` is always dense (at most three modifiers, no gaps), never
/// holds an LMTS modifier or the same modifier twice, and its `price` is the
/// pricer's output for exactly the modifiers it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    code: Arc<Code>,
    selected_modifiers: Vec<Modifier>,
    price: Decimal,
}

impl Selection {
    /// A selection with no modifiers, priced at the code's base.
    pub fn new(code: Arc<Code>, pricer: &Pricer) -> Self {
        Self::priced(code, Vec::new(), pricer)
    }

    pub(crate) fn priced(code: Arc<Code>, selected_modifiers: Vec<Modifier>, pricer: &Pricer) -> Self {
        let price = pricer.compute_price(&code, &selected_modifiers);
        Self {
            code,
            selected_modifiers,
            price,
        }
    }

    pub fn code(&self) -> &Arc<Code> {
        &self.code
    }

    /// Modifiers in slot order; index 0 is "modifier 1".
    pub fn modifiers(&self) -> &[Modifier] {
        &self.selected_modifiers
    }

    pub fn price(&self) -> Decimal {
        self.price
    }
}
