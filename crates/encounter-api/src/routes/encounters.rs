use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use encounter_core::models::code::CodeId;
use encounter_core::models::modifier::ModifierId;
use encounter_pricing::{Encounter, EncounterSummary, LineId, Slot};

use crate::error::ApiError;
use crate::extract::{Json as JsonBody, Path};
use crate::routes::codes::lookup_code;
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct CreateEncounterRequest {
    #[serde(default)]
    pub date_of_service: Option<Date>,
}

#[derive(Deserialize)]
pub struct AddLineRequest {
    pub code_id: CodeId,
}

#[derive(Deserialize)]
pub struct SetModifierRequest {
    pub modifier_id: ModifierId,
}

#[derive(Serialize)]
pub struct EncounterView {
    pub id: Uuid,
    #[serde(flatten)]
    pub summary: EncounterSummary,
}

#[derive(Serialize)]
pub struct AddLineResponse {
    pub line_id: LineId,
    pub encounter: EncounterView,
}

fn view(id: Uuid, encounter: &Encounter) -> EncounterView {
    EncounterView {
        id,
        summary: encounter.summary(),
    }
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("encounter not found: {id}"))
}

/// The body is optional; an empty one creates an undated encounter.
pub async fn create_encounter(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<EncounterView>), ApiError> {
    let req: CreateEncounterRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateEncounterRequest::default()
    } else {
        serde_json::from_slice(&body)?
    };

    let encounter = match req.date_of_service {
        Some(date) => Encounter::with_date_of_service(date),
        None => Encounter::new(),
    };
    let id = Uuid::new_v4();
    let view = view(id, &encounter);

    let mut encounters = state.encounters.lock().await;
    if encounters.len() >= state.max_sessions {
        tracing::warn!(sessions = encounters.len(), "session limit reached");
        return Err(ApiError::Unavailable(format!(
            "too many open encounters (limit {})",
            state.max_sessions
        )));
    }
    encounters.insert(id, encounter);
    tracing::info!(encounter_id = %id, sessions = encounters.len(), "encounter created");

    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_encounter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EncounterView>, ApiError> {
    let encounters = state.encounters.lock().await;
    let encounter = encounters.get(&id).ok_or_else(|| not_found(id))?;
    Ok(Json(view(id, encounter)))
}

pub async fn delete_encounter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut encounters = state.encounters.lock().await;
    encounters.remove(&id).ok_or_else(|| not_found(id))?;
    tracing::info!(encounter_id = %id, sessions = encounters.len(), "encounter discarded");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_line(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<AddLineRequest>,
) -> Result<(StatusCode, Json<AddLineResponse>), ApiError> {
    let code = lookup_code(&state, req.code_id)?;

    let mut encounters = state.encounters.lock().await;
    let encounter = encounters.get_mut(&id).ok_or_else(|| not_found(id))?;
    let line_id = encounter.add_code(code, &state.pricer)?;

    Ok((
        StatusCode::CREATED,
        Json(AddLineResponse {
            line_id,
            encounter: view(id, encounter),
        }),
    ))
}

pub async fn remove_line(
    State(state): State<AppState>,
    Path((id, line_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<EncounterView>, ApiError> {
    let mut encounters = state.encounters.lock().await;
    let encounter = encounters.get_mut(&id).ok_or_else(|| not_found(id))?;
    encounter.remove_line(LineId(line_id))?;
    Ok(Json(view(id, encounter)))
}

pub async fn set_modifier(
    State(state): State<AppState>,
    Path((id, line_id, slot)): Path<(Uuid, Uuid, Slot)>,
    JsonBody(req): JsonBody<SetModifierRequest>,
) -> Result<Json<EncounterView>, ApiError> {
    let mut encounters = state.encounters.lock().await;
    let encounter = encounters.get_mut(&id).ok_or_else(|| not_found(id))?;
    encounter.set_modifier(LineId(line_id), slot, req.modifier_id, &state.pricer)?;
    Ok(Json(view(id, encounter)))
}

pub async fn clear_modifier(
    State(state): State<AppState>,
    Path((id, line_id, slot)): Path<(Uuid, Uuid, Slot)>,
) -> Result<Json<EncounterView>, ApiError> {
    let mut encounters = state.encounters.lock().await;
    let encounter = encounters.get_mut(&id).ok_or_else(|| not_found(id))?;
    encounter.clear_modifier(LineId(line_id), slot, &state.pricer)?;
    Ok(Json(view(id, encounter)))
}
