//! Contrato de almacenamiento de la flota
//!
//! Los servicios de dominio sólo hablan con estos traits. Hay dos
//! implementaciones: PostgreSQL (`PgFleetRepository`) y memoria
//! (`MemoryFleetRepository`).
//!
//! Borrar un vehículo elimina sus asignaciones y sus logs de mantenimiento;
//! borrar una ruta elimina sus asignaciones.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{AssignmentCapacity, MaintenanceLog, Route, RouteAssignment, Vehicle};
use crate::utils::errors::StorageError;

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait]
pub trait FleetStorage: Send + Sync {
    async fn get_vehicle(&self, vehicle_id: &str) -> StorageResult<Option<Vehicle>>;

    async fn list_vehicles(&self) -> StorageResult<Vec<Vehicle>>;

    /// Falla con `Conflict` si el `vehicle_id` ya existe
    async fn insert_vehicle(&self, vehicle: &Vehicle) -> StorageResult<()>;

    /// Falla con `MissingReference` si el vehículo no existe
    async fn save_vehicle(&self, vehicle: &Vehicle) -> StorageResult<()>;

    /// Devuelve `false` si no había nada que borrar
    async fn delete_vehicle(&self, vehicle_id: &str) -> StorageResult<bool>;

    async fn get_route(&self, route_number: &str) -> StorageResult<Option<Route>>;

    /// Rutas ordenadas por número como texto ("10" antes que "9")
    async fn list_routes(&self) -> StorageResult<Vec<Route>>;

    async fn insert_route(&self, route: &Route) -> StorageResult<()>;

    async fn delete_route(&self, route_number: &str) -> StorageResult<bool>;

    /// Falla con `Conflict` si el vehículo ya tiene exactamente esa ventana
    async fn insert_assignment(&self, assignment: &RouteAssignment) -> StorageResult<()>;

    async fn delete_assignment(&self, id: Uuid) -> StorageResult<bool>;

    /// Asignaciones de la ruta con la capacidad del vehículo, por hora de inicio
    async fn list_assignments_for_route(
        &self,
        route_number: &str,
    ) -> StorageResult<Vec<AssignmentCapacity>>;

    /// Logs del vehículo por fecha descendente
    async fn list_maintenance_logs_for_vehicle(
        &self,
        vehicle_id: &str,
    ) -> StorageResult<Vec<MaintenanceLog>>;

    /// Abrir una unidad de trabajo atómica
    async fn begin(&self) -> StorageResult<Box<dyn FleetTransaction>>;
}

/// Unidad de trabajo: nada es visible fuera de ella hasta `commit`.
/// Si se descarta sin `commit`, todo se deshace.
#[async_trait]
pub trait FleetTransaction: Send {
    /// Leer el vehículo bloqueándolo hasta el final de la transacción
    async fn lock_vehicle(&mut self, vehicle_id: &str) -> StorageResult<Option<Vehicle>>;

    async fn save_maintenance_log(&mut self, log: &MaintenanceLog) -> StorageResult<()>;

    async fn save_vehicle(&mut self, vehicle: &Vehicle) -> StorageResult<()>;

    async fn commit(self: Box<Self>) -> StorageResult<()>;

    async fn rollback(self: Box<Self>) -> StorageResult<()>;
}
