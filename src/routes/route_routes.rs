use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::route_controller::RouteController;
use crate::dto::MessageResponse;
use crate::models::route::{CreateRouteRequest, RouteDetailResponse};
use crate::models::Route;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(create_route))
        .route("/:route_number", get(get_route_detail).delete(delete_route))
}

async fn create_route(
    State(state): State<AppState>,
    payload: Result<Json<CreateRouteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Route>), AppError> {
    let Json(request) = payload?;
    let controller = RouteController::new(state.storage.clone());
    let route = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(route)))
}

async fn list_routes(State(state): State<AppState>) -> Result<Json<Vec<Route>>, AppError> {
    let controller = RouteController::new(state.storage.clone());
    Ok(Json(controller.list().await?))
}

async fn get_route_detail(
    State(state): State<AppState>,
    Path(route_number): Path<String>,
) -> Result<Json<RouteDetailResponse>, AppError> {
    let controller = RouteController::new(state.storage.clone());
    Ok(Json(controller.detail(&route_number).await?))
}

async fn delete_route(
    State(state): State<AppState>,
    Path(route_number): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = RouteController::new(state.storage.clone());
    controller.delete(&route_number).await?;
    Ok(Json(MessageResponse::new("Route deleted successfully.")))
}
