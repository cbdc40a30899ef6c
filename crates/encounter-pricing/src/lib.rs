//! encounter-pricing
//!
//! The modifier pricing engine. Pure and synchronous, no I/O.
//!
//! - [`validator`] decides which modifiers may sit in which of a code's three
//!   slots and keeps each selection dense and rule-compliant.
//! - [`calculator`] folds a selection's modifiers over the code's base price
//!   using the arithmetic rules in [`rules`].
//! - [`encounter`] aggregates priced selections into an encounter total.

pub mod calculator;
pub mod encounter;
pub mod error;
pub mod rules;
pub mod selection;
pub mod validator;

pub use calculator::{PriceBreakdown, PriceStep, Pricer, PricingWarning};
pub use encounter::{Encounter, EncounterSummary, LineId};
pub use error::PricingError;
pub use rules::{PriceRule, RuleTable};
pub use selection::Selection;
pub use validator::Slot;
