use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::assignment_controller::AssignmentController;
use crate::dto::MessageResponse;
use crate::models::route_assignment::CreateAssignmentRequest;
use crate::models::RouteAssignment;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_assignment_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_assignment))
        .route("/:id", delete(delete_assignment))
}

async fn create_assignment(
    State(state): State<AppState>,
    payload: Result<Json<CreateAssignmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RouteAssignment>), AppError> {
    let Json(request) = payload?;
    let controller = AssignmentController::new(state.storage.clone());
    let assignment = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

async fn delete_assignment(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let controller = AssignmentController::new(state.storage.clone());
    controller.delete(id).await?;
    Ok(Json(MessageResponse::new("Route assignment deleted successfully.")))
}
