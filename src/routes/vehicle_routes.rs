use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::MessageResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::{MaintenanceHistoryResponse, Vehicle};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:vehicle_id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route(
            "/:vehicle_id/maintenance",
            get(get_maintenance_history).post(add_maintenance_log),
        )
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let Json(request) = payload?;
    let controller = VehicleController::new(state.storage.clone());
    let vehicle = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.storage.clone());
    Ok(Json(controller.list().await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state.storage.clone());
    Ok(Json(controller.get_by_id(&vehicle_id).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
    payload: Result<Json<UpdateVehicleRequest>, JsonRejection>,
) -> Result<Json<Vehicle>, AppError> {
    let Json(request) = payload?;
    let controller = VehicleController::new(state.storage.clone());
    Ok(Json(controller.update(&vehicle_id, request).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = VehicleController::new(state.storage.clone());
    controller.delete(&vehicle_id).await?;
    Ok(Json(MessageResponse::new("Vehicle deleted successfully.")))
}

async fn get_maintenance_history(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<MaintenanceHistoryResponse>, AppError> {
    let controller = MaintenanceController::new(state.storage.clone());
    Ok(Json(controller.history(&vehicle_id).await?))
}

// El cuerpo se lee crudo: los mensajes de error del payload son propios
async fn add_maintenance_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let controller = MaintenanceController::new(state.storage.clone());
    controller.record(&user, &vehicle_id, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Maintenance log added successfully.")),
    ))
}
