use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use encounter_core::models::code::CodeId;
use encounter_core::models::modifier::ModifierId;
use encounter_pricing::validator::{self, Slot};
use encounter_pricing::{PriceBreakdown, PricingError, Selection};

use crate::error::ApiError;
use crate::extract::Json as JsonBody;
use crate::routes::codes::lookup_code;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PriceRequest {
    pub code_id: CodeId,
    #[serde(default)]
    pub modifier_ids: Vec<ModifierId>,
}

/// Price a code with modifiers in slot order, without touching any
/// encounter. The modifiers go through the same selection rules as an
/// encounter line.
pub async fn quote(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PriceRequest>,
) -> Result<Json<PriceBreakdown>, ApiError> {
    let code = lookup_code(&state, req.code_id)?;

    let mut selection = Selection::new(code.clone(), &state.pricer);
    for (index, &modifier_id) in req.modifier_ids.iter().enumerate() {
        let slot = Slot::new(index)?;
        let modifier = code.modifier(modifier_id).ok_or(PricingError::UnknownModifier {
            code: code.id,
            modifier: modifier_id,
        })?;
        selection = validator::set_slot(&selection, slot, modifier, &state.pricer)?;
    }

    Ok(Json(state.pricer.price_breakdown(&code, selection.modifiers())))
}
