use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use encounter_core::models::code::{Code, CodeId};
use encounter_core::models::modifier::Modifier;
use encounter_pricing::validator;

use crate::error::ApiError;
use crate::extract::Path;
use crate::state::AppState;

pub async fn list_codes(State(state): State<AppState>) -> Json<Vec<Arc<Code>>> {
    Json(state.catalog.codes().to_vec())
}

/// Single-code endpoint kept for clients of the upstream `GET /code`.
pub async fn first_code(State(state): State<AppState>) -> Result<Json<Arc<Code>>, ApiError> {
    state
        .catalog
        .first()
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("catalog is empty".to_string()))
}

pub async fn get_code(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Arc<Code>>, ApiError> {
    let code = lookup_code(&state, CodeId(id))?;
    Ok(Json(code))
}

/// Modifiers a user may pick for the code (LMTS excluded).
pub async fn code_modifiers(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<Modifier>>, ApiError> {
    let code = lookup_code(&state, CodeId(id))?;
    let available = validator::available_modifiers(&code)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(available))
}

pub(crate) fn lookup_code(state: &AppState, id: CodeId) -> Result<Arc<Code>, ApiError> {
    state
        .catalog
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("code not found: {id}")))
}
