//! encounter-api library root.
//!
//! Exposes the router and configuration so that integration tests can drive
//! the service in-process without binding a socket.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Catalog
        .route("/code", get(routes::codes::first_code))
        .route("/codes", get(routes::codes::list_codes))
        .route("/codes/{id}", get(routes::codes::get_code))
        .route("/codes/{id}/modifiers", get(routes::codes::code_modifiers))
        // Stateless quote
        .route("/price", post(routes::price::quote))
        // Encounter sessions
        .route("/encounters", post(routes::encounters::create_encounter))
        .route(
            "/encounters/{id}",
            get(routes::encounters::get_encounter).delete(routes::encounters::delete_encounter),
        )
        .route("/encounters/{id}/lines", post(routes::encounters::add_line))
        .route(
            "/encounters/{id}/lines/{line_id}",
            axum::routing::delete(routes::encounters::remove_line),
        )
        .route(
            "/encounters/{id}/lines/{line_id}/modifiers/{slot}",
            put(routes::encounters::set_modifier).delete(routes::encounters::clear_modifier),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::request_log::request_log))
                .layer(cors),
        )
        .with_state(state)
}
