use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::route_controller::RouteController;
use crate::models::RouteEfficiency;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new().route("/route-efficiency", get(route_efficiency_report))
}

async fn route_efficiency_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<RouteEfficiency>>, AppError> {
    let controller = RouteController::new(state.storage.clone());
    Ok(Json(controller.efficiency_report().await?))
}
