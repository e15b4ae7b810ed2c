//! Routers de la API
//!
//! `create_app_router` arma la aplicación completa: rutas `/api` detrás del
//! middleware de identidad, `/health` abierto, CORS, compresión y trazas HTTP.

pub mod vehicle_routes;
pub mod route_routes;
pub mod assignment_routes;
pub mod report_routes;

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{auth_middleware, cors_middleware};
use crate::state::AppState;

pub fn create_app_router(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);

    let api = Router::new()
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/routes", route_routes::create_route_router())
        .nest("/assignments", assignment_routes::create_assignment_router())
        .nest("/reports", report_routes::create_report_router())
        .layer(middleware::from_fn(auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
