use thiserror::Error;

use encounter_core::models::code::CodeId;
use encounter_core::models::modifier::ModifierId;

use crate::encounter::LineId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("invalid modifier slot {index}: expected 0..=2")]
    InvalidSlot { index: usize },

    #[error("modifier slot {slot} is disabled: the previous slot is empty")]
    SlotDisabled { slot: usize },

    #[error("modifier {modifier} is not available for code {code}")]
    UnknownModifier { code: CodeId, modifier: ModifierId },

    #[error("modifier {modifier} is an excluded (LMTS) modifier")]
    ExcludedModifier { modifier: ModifierId },

    #[error("modifier {modifier} is already applied in slot {slot}")]
    DuplicateModifier { modifier: ModifierId, slot: usize },

    #[error("code {code} is not effective on {date}")]
    CodeNotEffective { code: CodeId, date: jiff::civil::Date },

    #[error("modifier {modifier} is not effective on {date}")]
    ModifierNotEffective {
        modifier: ModifierId,
        date: jiff::civil::Date,
    },

    #[error("line not found: {line_id}")]
    UnknownLine { line_id: LineId },
}
