use std::fmt;
use std::sync::Arc;

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use encounter_core::models::code::{Code, CodeId};
use encounter_core::models::modifier::{Modifier, ModifierId};

use crate::calculator::Pricer;
use crate::error::PricingError;
use crate::selection::Selection;
use crate::validator::{self, Slot};

/// Identifier of one line item on an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct LineId(pub Uuid);

impl LineId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct LineItem {
    line_id: LineId,
    selection: Selection,
}

/// A patient visit: the codes billed on it and their priced modifiers.
///
/// Every mutation reprices only the line it touches and replaces that line's
/// [`Selection`] wholesale, so the total is always the sum of current prices.
#[derive(Debug, Clone, Default)]
pub struct Encounter {
    date_of_service: Option<Date>,
    lines: Vec<LineItem>,
}

impl Encounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// An encounter that only accepts codes and modifiers effective on `date`.
    pub fn with_date_of_service(date: Date) -> Self {
        Self {
            date_of_service: Some(date),
            lines: Vec::new(),
        }
    }

    pub fn date_of_service(&self) -> Option<Date> {
        self.date_of_service
    }

    /// Append `code` as a new line with no modifiers.
    pub fn add_code(&mut self, code: Arc<Code>, pricer: &Pricer) -> Result<LineId, PricingError> {
        if let Some(date) = self.date_of_service
            && !code.is_effective_on(date)
        {
            return Err(PricingError::CodeNotEffective {
                code: code.id,
                date,
            });
        }

        let line_id = LineId::new();
        let selection = Selection::new(code, pricer);
        tracing::info!(%line_id, code_id = %selection.code().id, price = %selection.price(), "line added");
        self.lines.push(LineItem { line_id, selection });
        Ok(line_id)
    }

    pub fn remove_line(&mut self, line_id: LineId) -> Result<Selection, PricingError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.line_id == line_id)
            .ok_or(PricingError::UnknownLine { line_id })?;
        let removed = self.lines.remove(index).selection;
        tracing::info!(%line_id, price = %removed.price(), "line removed");
        Ok(removed)
    }

    pub fn set_modifier(
        &mut self,
        line_id: LineId,
        slot: Slot,
        modifier_id: ModifierId,
        pricer: &Pricer,
    ) -> Result<&Selection, PricingError> {
        let date_of_service = self.date_of_service;
        let line = self.line_mut(line_id)?;
        let code = Arc::clone(line.selection.code());
        let modifier = code
            .modifier(modifier_id)
            .ok_or(PricingError::UnknownModifier {
                code: code.id,
                modifier: modifier_id,
            })?;

        if let Some(date) = date_of_service
            && !modifier.is_effective_on(date)
        {
            return Err(PricingError::ModifierNotEffective {
                modifier: modifier_id,
                date,
            });
        }

        line.selection = validator::set_slot(&line.selection, slot, modifier, pricer)?;
        Ok(&line.selection)
    }

    pub fn clear_modifier(
        &mut self,
        line_id: LineId,
        slot: Slot,
        pricer: &Pricer,
    ) -> Result<&Selection, PricingError> {
        let line = self.line_mut(line_id)?;
        line.selection = validator::clear_slot(&line.selection, slot, pricer);
        Ok(&line.selection)
    }

    pub fn line(&self, line_id: LineId) -> Option<&Selection> {
        self.lines
            .iter()
            .find(|l| l.line_id == line_id)
            .map(|l| &l.selection)
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> impl Iterator<Item = (LineId, &Selection)> {
        self.lines.iter().map(|l| (l.line_id, &l.selection))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|l| l.selection.price()).sum()
    }

    pub fn summary(&self) -> EncounterSummary {
        let lines = self
            .lines
            .iter()
            .map(|l| {
                let selection = &l.selection;
                let code = selection.code();
                let available = match self.date_of_service {
                    Some(date) => validator::available_modifiers_on(code, date),
                    None => validator::available_modifiers(code),
                };
                LineSummary {
                    line_id: l.line_id,
                    code_id: code.id,
                    code: code.code.clone(),
                    description: code.description.clone(),
                    base: code.amount,
                    modifiers: selection.modifiers().to_vec(),
                    available_modifiers: available.into_iter().cloned().collect(),
                    enabled_slots: Slot::ALL
                        .map(|slot| validator::is_slot_enabled(selection, slot)),
                    price: selection.price(),
                }
            })
            .collect();

        EncounterSummary {
            date_of_service: self.date_of_service,
            lines,
            total: self.total(),
        }
    }

    fn line_mut(&mut self, line_id: LineId) -> Result<&mut LineItem, PricingError> {
        self.lines
            .iter_mut()
            .find(|l| l.line_id == line_id)
            .ok_or(PricingError::UnknownLine { line_id })
    }
}

/// Everything the hosting UI needs to render one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineSummary {
    pub line_id: LineId,
    pub code_id: CodeId,
    pub code: String,
    pub description: String,
    #[ts(type = "string")]
    pub base: Decimal,
    pub modifiers: Vec<Modifier>,
    pub available_modifiers: Vec<Modifier>,
    /// Whether each of the three slots may currently be picked.
    pub enabled_slots: [bool; Slot::COUNT],
    #[ts(type = "string")]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EncounterSummary {
    pub date_of_service: Option<Date>,
    pub lines: Vec<LineSummary>,
    #[ts(type = "string")]
    pub total: Decimal,
}
