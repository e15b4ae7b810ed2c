//! Repositorio en memoria
//!
//! Usado en desarrollo local (`STORAGE_BACKEND=memory`) y en los tests.
//! Una transacción retiene el mutex durante toda su vida y trabaja sobre una
//! copia de los datos; `commit` reemplaza el estado con la copia.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;
use uuid::Uuid;

use crate::models::{AssignmentCapacity, MaintenanceLog, Route, RouteAssignment, Vehicle};
use crate::repositories::storage::{FleetStorage, FleetTransaction, StorageResult};
use crate::utils::errors::StorageError;

#[derive(Debug, Default, Clone)]
struct FleetData {
    vehicles: BTreeMap<String, Vehicle>,
    routes: BTreeMap<String, Route>,
    assignments: Vec<RouteAssignment>,
    maintenance_logs: Vec<MaintenanceLog>,
}

impl FleetData {
    fn update_vehicle(&mut self, vehicle: &Vehicle) -> StorageResult<()> {
        match self.vehicles.get_mut(&vehicle.vehicle_id) {
            Some(current) => {
                *current = vehicle.clone();
                Ok(())
            }
            None => Err(StorageError::MissingReference(format!(
                "vehicle '{}' does not exist",
                vehicle.vehicle_id
            ))),
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryFleetRepository {
    data: Arc<Mutex<FleetData>>,
    fail_transactional_vehicle_saves: Arc<AtomicBool>,
}

impl MemoryFleetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hace fallar `save_vehicle` dentro de transacciones (para probar rollback)
    pub fn fail_transactional_vehicle_saves(&self, fail: bool) {
        self.fail_transactional_vehicle_saves
            .store(fail, Ordering::SeqCst);
    }

    pub async fn maintenance_log_count(&self) -> usize {
        self.data.lock().await.maintenance_logs.len()
    }

    pub async fn assignment_count(&self) -> usize {
        self.data.lock().await.assignments.len()
    }
}

#[async_trait]
impl FleetStorage for MemoryFleetRepository {
    async fn get_vehicle(&self, vehicle_id: &str) -> StorageResult<Option<Vehicle>> {
        Ok(self.data.lock().await.vehicles.get(vehicle_id).cloned())
    }

    async fn list_vehicles(&self) -> StorageResult<Vec<Vehicle>> {
        Ok(self.data.lock().await.vehicles.values().cloned().collect())
    }

    async fn insert_vehicle(&self, vehicle: &Vehicle) -> StorageResult<()> {
        let mut data = self.data.lock().await;
        if data.vehicles.contains_key(&vehicle.vehicle_id) {
            return Err(StorageError::Conflict(format!(
                "vehicle '{}' already exists",
                vehicle.vehicle_id
            )));
        }
        data.vehicles
            .insert(vehicle.vehicle_id.clone(), vehicle.clone());
        Ok(())
    }

    async fn save_vehicle(&self, vehicle: &Vehicle) -> StorageResult<()> {
        self.data.lock().await.update_vehicle(vehicle)
    }

    async fn delete_vehicle(&self, vehicle_id: &str) -> StorageResult<bool> {
        let mut data = self.data.lock().await;
        if data.vehicles.remove(vehicle_id).is_none() {
            return Ok(false);
        }
        data.assignments.retain(|a| a.vehicle_id != vehicle_id);
        data.maintenance_logs.retain(|l| l.vehicle_id != vehicle_id);
        debug!("Vehicle {} deleted with its assignments and logs", vehicle_id);
        Ok(true)
    }

    async fn get_route(&self, route_number: &str) -> StorageResult<Option<Route>> {
        Ok(self.data.lock().await.routes.get(route_number).cloned())
    }

    async fn list_routes(&self) -> StorageResult<Vec<Route>> {
        Ok(self.data.lock().await.routes.values().cloned().collect())
    }

    async fn insert_route(&self, route: &Route) -> StorageResult<()> {
        let mut data = self.data.lock().await;
        if data.routes.contains_key(&route.route_number) {
            return Err(StorageError::Conflict(format!(
                "route '{}' already exists",
                route.route_number
            )));
        }
        data.routes
            .insert(route.route_number.clone(), route.clone());
        Ok(())
    }

    async fn delete_route(&self, route_number: &str) -> StorageResult<bool> {
        let mut data = self.data.lock().await;
        if data.routes.remove(route_number).is_none() {
            return Ok(false);
        }
        data.assignments.retain(|a| a.route_number != route_number);
        debug!("Route {} deleted with its assignments", route_number);
        Ok(true)
    }

    async fn insert_assignment(&self, assignment: &RouteAssignment) -> StorageResult<()> {
        let mut data = self.data.lock().await;
        if !data.vehicles.contains_key(&assignment.vehicle_id) {
            return Err(StorageError::MissingReference(format!(
                "vehicle '{}' does not exist",
                assignment.vehicle_id
            )));
        }
        if !data.routes.contains_key(&assignment.route_number) {
            return Err(StorageError::MissingReference(format!(
                "route '{}' does not exist",
                assignment.route_number
            )));
        }
        if data.assignments.iter().any(|a| a.same_slot(assignment)) {
            return Err(StorageError::Conflict(format!(
                "vehicle '{}' already assigned for {}-{}",
                assignment.vehicle_id, assignment.start_time, assignment.end_time
            )));
        }
        data.assignments.push(assignment.clone());
        Ok(())
    }

    async fn delete_assignment(&self, id: Uuid) -> StorageResult<bool> {
        let mut data = self.data.lock().await;
        let before = data.assignments.len();
        data.assignments.retain(|a| a.id != id);
        Ok(data.assignments.len() < before)
    }

    async fn list_assignments_for_route(
        &self,
        route_number: &str,
    ) -> StorageResult<Vec<AssignmentCapacity>> {
        let data = self.data.lock().await;
        let mut joined = data
            .assignments
            .iter()
            .filter(|a| a.route_number == route_number)
            .map(|a| -> StorageResult<AssignmentCapacity> {
                let vehicle = data.vehicles.get(&a.vehicle_id).ok_or_else(|| {
                    StorageError::Corrupt(format!(
                        "assignment {} references missing vehicle '{}'",
                        a.id, a.vehicle_id
                    ))
                })?;
                Ok(AssignmentCapacity {
                    assignment: a.clone(),
                    vehicle_type: vehicle.vehicle_type,
                    capacity: vehicle.capacity,
                })
            })
            .collect::<StorageResult<Vec<_>>>()?;

        joined.sort_by_key(|j| j.assignment.start_time);
        Ok(joined)
    }

    async fn list_maintenance_logs_for_vehicle(
        &self,
        vehicle_id: &str,
    ) -> StorageResult<Vec<MaintenanceLog>> {
        let data = self.data.lock().await;
        let mut logs: Vec<MaintenanceLog> = data
            .maintenance_logs
            .iter()
            .filter(|l| l.vehicle_id == vehicle_id)
            .cloned()
            .collect();

        logs.sort_by(|a, b| b.maintenance_date.cmp(&a.maintenance_date));
        Ok(logs)
    }

    async fn begin(&self) -> StorageResult<Box<dyn FleetTransaction>> {
        let guard = self.data.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryFleetTransaction {
            guard,
            staged,
            fail_vehicle_saves: self.fail_transactional_vehicle_saves.load(Ordering::SeqCst),
        }))
    }
}

pub struct MemoryFleetTransaction {
    guard: OwnedMutexGuard<FleetData>,
    staged: FleetData,
    fail_vehicle_saves: bool,
}

#[async_trait]
impl FleetTransaction for MemoryFleetTransaction {
    async fn lock_vehicle(&mut self, vehicle_id: &str) -> StorageResult<Option<Vehicle>> {
        Ok(self.staged.vehicles.get(vehicle_id).cloned())
    }

    async fn save_maintenance_log(&mut self, log: &MaintenanceLog) -> StorageResult<()> {
        if !self.staged.vehicles.contains_key(&log.vehicle_id) {
            return Err(StorageError::MissingReference(format!(
                "vehicle '{}' does not exist",
                log.vehicle_id
            )));
        }
        self.staged.maintenance_logs.push(log.clone());
        Ok(())
    }

    async fn save_vehicle(&mut self, vehicle: &Vehicle) -> StorageResult<()> {
        if self.fail_vehicle_saves {
            return Err(StorageError::Unavailable(format!(
                "injected failure saving vehicle '{}'",
                vehicle.vehicle_id
            )));
        }
        self.staged.update_vehicle(vehicle)
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        let MemoryFleetTransaction {
            mut guard, staged, ..
        } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StorageResult<()> {
        Ok(())
    }
}
