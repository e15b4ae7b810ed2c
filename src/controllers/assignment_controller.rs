use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::route_assignment::CreateAssignmentRequest;
use crate::models::RouteAssignment;
use crate::repositories::FleetStorage;
use crate::services::validate_assignment;
use crate::utils::errors::{not_found_error, AppError, AppResult, StorageError};

pub struct AssignmentController {
    storage: Arc<dyn FleetStorage>,
}

impl AssignmentController {
    pub fn new(storage: Arc<dyn FleetStorage>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, request: CreateAssignmentRequest) -> AppResult<RouteAssignment> {
        request.validate()?;

        let assignment = RouteAssignment::from(request);
        validate_assignment(&assignment)?;

        if self.storage.get_vehicle(&assignment.vehicle_id).await?.is_none() {
            return Err(not_found_error("Vehicle", &assignment.vehicle_id));
        }
        if self.storage.get_route(&assignment.route_number).await?.is_none() {
            return Err(not_found_error("Route", &assignment.route_number));
        }

        self.storage
            .insert_assignment(&assignment)
            .await
            .map_err(|e| match e {
                StorageError::Conflict(_) => AppError::Conflict(format!(
                    "Vehicle '{}' is already assigned from {} to {}",
                    assignment.vehicle_id, assignment.start_time, assignment.end_time
                )),
                other => AppError::from(other),
            })?;

        info!("📋 Assignment created: {}", assignment);
        Ok(assignment)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.storage.delete_assignment(id).await? {
            return Err(not_found_error("Route assignment", &id.to_string()));
        }
        Ok(())
    }
}
