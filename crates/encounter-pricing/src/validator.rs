//! Modifier selection rules.
//!
//! A code carries up to three ordered modifier slots. Slot 0 is always open;
//! each later slot opens only once the slot before it holds a modifier.
//! Setting or clearing a slot drops every slot after it, because later
//! modifiers were chosen against the earlier ones.

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use encounter_core::models::code::Code;
use encounter_core::models::modifier::Modifier;

use crate::calculator::Pricer;
use crate::error::PricingError;
use crate::selection::Selection;

/// A validated modifier slot index in `0..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Slot(usize);

impl Slot {
    pub const COUNT: usize = 3;
    pub const FIRST: Slot = Slot(0);
    pub const SECOND: Slot = Slot(1);
    pub const THIRD: Slot = Slot(2);
    pub const ALL: [Slot; Self::COUNT] = [Self::FIRST, Self::SECOND, Self::THIRD];

    pub fn new(index: usize) -> Result<Self, PricingError> {
        if index < Self::COUNT {
            Ok(Slot(index))
        } else {
            Err(PricingError::InvalidSlot { index })
        }
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for Slot {
    type Error = PricingError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Slot::new(index)
    }
}

impl From<Slot> for usize {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Modifiers a user may pick for `code`, in catalog order. LMTS modifiers
/// are never offered.
pub fn available_modifiers(code: &Code) -> Vec<&Modifier> {
    code.modifiers.iter().filter(|m| !m.is_excluded()).collect()
}

/// [`available_modifiers`] restricted to those effective on `date`.
pub fn available_modifiers_on(code: &Code, date: Date) -> Vec<&Modifier> {
    available_modifiers(code)
        .into_iter()
        .filter(|m| m.is_effective_on(date))
        .collect()
}

pub fn is_slot_enabled(selection: &Selection, slot: Slot) -> bool {
    slot.index() <= selection.modifiers().len()
}

/// Put `modifier` into `slot`, dropping any later slots, and reprice.
///
/// The modifier is resolved by id against the selection's code and the
/// catalog's copy is the one stored. On error `selection` is untouched.
pub fn set_slot(
    selection: &Selection,
    slot: Slot,
    modifier: &Modifier,
    pricer: &Pricer,
) -> Result<Selection, PricingError> {
    if !is_slot_enabled(selection, slot) {
        return Err(PricingError::SlotDisabled { slot: slot.index() });
    }

    let code = selection.code();
    let modifier = code
        .modifier(modifier.id)
        .ok_or(PricingError::UnknownModifier {
            code: code.id,
            modifier: modifier.id,
        })?;

    if modifier.is_excluded() {
        return Err(PricingError::ExcludedModifier {
            modifier: modifier.id,
        });
    }

    let earlier = &selection.modifiers()[..slot.index()];
    if let Some(position) = earlier.iter().position(|m| m.id == modifier.id) {
        return Err(PricingError::DuplicateModifier {
            modifier: modifier.id,
            slot: position,
        });
    }

    let mut modifiers = earlier.to_vec();
    modifiers.push(modifier.clone());
    Ok(Selection::priced(code.clone(), modifiers, pricer))
}

/// Empty `slot` and every slot after it, and reprice.
pub fn clear_slot(selection: &Selection, slot: Slot, pricer: &Pricer) -> Selection {
    let keep = slot.index().min(selection.modifiers().len());
    Selection::priced(
        selection.code().clone(),
        selection.modifiers()[..keep].to_vec(),
        pricer,
    )
}
