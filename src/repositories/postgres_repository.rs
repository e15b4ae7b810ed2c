use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::{
    AssignmentCapacity, MaintenanceLog, Route, RouteAssignment, Vehicle, VehicleType,
};
use crate::repositories::storage::{FleetStorage, FleetTransaction, StorageResult};
use crate::utils::errors::StorageError;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    vehicle_id: String,
    vehicle_type: String,
    capacity: i64,
    last_maintenance: NaiveDate,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = StorageError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let vehicle_type = row
            .vehicle_type
            .parse::<VehicleType>()
            .map_err(StorageError::Corrupt)?;
        let capacity = u32::try_from(row.capacity).map_err(|_| {
            StorageError::Corrupt(format!(
                "capacity {} out of range for vehicle '{}'",
                row.capacity, row.vehicle_id
            ))
        })?;

        Ok(Vehicle {
            vehicle_id: row.vehicle_id,
            vehicle_type,
            capacity,
            last_maintenance: row.last_maintenance,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RouteRow {
    route_number: String,
    start_point: String,
    end_point: String,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        Route::new(row.route_number, row.start_point, row.end_point)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AssignmentCapacityRow {
    id: Uuid,
    vehicle_id: String,
    route_number: String,
    driver_name: String,
    start_time: NaiveTime,
    end_time: NaiveTime,
    vehicle_type: String,
    capacity: i64,
}

impl TryFrom<AssignmentCapacityRow> for AssignmentCapacity {
    type Error = StorageError;

    fn try_from(row: AssignmentCapacityRow) -> Result<Self, Self::Error> {
        let vehicle_type = row
            .vehicle_type
            .parse::<VehicleType>()
            .map_err(StorageError::Corrupt)?;
        let capacity = u32::try_from(row.capacity).map_err(|_| {
            StorageError::Corrupt(format!(
                "capacity {} out of range for vehicle '{}'",
                row.capacity, row.vehicle_id
            ))
        })?;

        Ok(AssignmentCapacity {
            assignment: RouteAssignment {
                id: row.id,
                vehicle_id: row.vehicle_id,
                route_number: row.route_number,
                driver_name: row.driver_name,
                start_time: row.start_time,
                end_time: row.end_time,
            },
            vehicle_type,
            capacity,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MaintenanceLogRow {
    id: Uuid,
    vehicle_id: String,
    maintenance_date: NaiveDate,
    description: String,
    cost: Decimal,
}

impl From<MaintenanceLogRow> for MaintenanceLog {
    fn from(row: MaintenanceLogRow) -> Self {
        MaintenanceLog {
            id: row.id,
            vehicle_id: row.vehicle_id,
            maintenance_date: row.maintenance_date,
            description: row.description,
            cost: row.cost,
        }
    }
}

/// Traducir violaciones de constraints a errores de dominio
fn map_write_error(e: sqlx::Error, context: &str) -> StorageError {
    let code = e
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned());

    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => StorageError::Conflict(format!("{}: duplicate record", context)),
        Some(FOREIGN_KEY_VIOLATION) => {
            StorageError::MissingReference(format!("{}: referenced record does not exist", context))
        }
        _ => StorageError::Database(e),
    }
}

pub struct PgFleetRepository {
    pool: PgPool,
}

impl PgFleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FleetStorage for PgFleetRepository {
    async fn get_vehicle(&self, vehicle_id: &str) -> StorageResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(
            "SELECT vehicle_id, vehicle_type, capacity, last_maintenance FROM vehicles WHERE vehicle_id = $1",
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn list_vehicles(&self) -> StorageResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            "SELECT vehicle_id, vehicle_type, capacity, last_maintenance FROM vehicles ORDER BY vehicle_id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn insert_vehicle(&self, vehicle: &Vehicle) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicles (vehicle_id, vehicle_type, capacity, last_maintenance)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&vehicle.vehicle_id)
        .bind(vehicle.vehicle_type.as_str())
        .bind(i64::from(vehicle.capacity))
        .bind(vehicle.last_maintenance)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "insert vehicle"))?;

        Ok(())
    }

    async fn save_vehicle(&self, vehicle: &Vehicle) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET vehicle_type = $2, capacity = $3, last_maintenance = $4
            WHERE vehicle_id = $1
            "#,
        )
        .bind(&vehicle.vehicle_id)
        .bind(vehicle.vehicle_type.as_str())
        .bind(i64::from(vehicle.capacity))
        .bind(vehicle.last_maintenance)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::MissingReference(format!(
                "vehicle '{}' does not exist",
                vehicle.vehicle_id
            )));
        }
        Ok(())
    }

    async fn delete_vehicle(&self, vehicle_id: &str) -> StorageResult<bool> {
        // ON DELETE CASCADE borra asignaciones y logs
        let result = sqlx::query("DELETE FROM vehicles WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_route(&self, route_number: &str) -> StorageResult<Option<Route>> {
        let row = sqlx::query_as::<_, RouteRow>(
            "SELECT route_number, start_point, end_point FROM routes WHERE route_number = $1",
        )
        .bind(route_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Route::from))
    }

    async fn list_routes(&self) -> StorageResult<Vec<Route>> {
        let rows = sqlx::query_as::<_, RouteRow>(
            "SELECT route_number, start_point, end_point FROM routes ORDER BY route_number",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Route::from).collect())
    }

    async fn insert_route(&self, route: &Route) -> StorageResult<()> {
        sqlx::query(
            "INSERT INTO routes (route_number, start_point, end_point) VALUES ($1, $2, $3)",
        )
        .bind(&route.route_number)
        .bind(&route.start_point)
        .bind(&route.end_point)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "insert route"))?;

        Ok(())
    }

    async fn delete_route(&self, route_number: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM routes WHERE route_number = $1")
            .bind(route_number)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_assignment(&self, assignment: &RouteAssignment) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO route_assignments (id, vehicle_id, route_number, driver_name, start_time, end_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(assignment.id)
        .bind(&assignment.vehicle_id)
        .bind(&assignment.route_number)
        .bind(&assignment.driver_name)
        .bind(assignment.start_time)
        .bind(assignment.end_time)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "insert route assignment"))?;

        Ok(())
    }

    async fn delete_assignment(&self, id: Uuid) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM route_assignments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_assignments_for_route(
        &self,
        route_number: &str,
    ) -> StorageResult<Vec<AssignmentCapacity>> {
        let rows = sqlx::query_as::<_, AssignmentCapacityRow>(
            r#"
            SELECT ra.id, ra.vehicle_id, ra.route_number, ra.driver_name,
                   ra.start_time, ra.end_time, v.vehicle_type, v.capacity
            FROM route_assignments ra
            JOIN vehicles v ON v.vehicle_id = ra.vehicle_id
            WHERE ra.route_number = $1
            ORDER BY ra.start_time, ra.id
            "#,
        )
        .bind(route_number)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AssignmentCapacity::try_from).collect()
    }

    async fn list_maintenance_logs_for_vehicle(
        &self,
        vehicle_id: &str,
    ) -> StorageResult<Vec<MaintenanceLog>> {
        let rows = sqlx::query_as::<_, MaintenanceLogRow>(
            r#"
            SELECT id, vehicle_id, maintenance_date, description, cost
            FROM maintenance_logs
            WHERE vehicle_id = $1
            ORDER BY maintenance_date DESC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MaintenanceLog::from).collect())
    }

    async fn begin(&self) -> StorageResult<Box<dyn FleetTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgFleetTransaction { tx }))
    }
}

/// Transacción PostgreSQL; `Drop` sin `commit` hace rollback
pub struct PgFleetTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl FleetTransaction for PgFleetTransaction {
    async fn lock_vehicle(&mut self, vehicle_id: &str) -> StorageResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT vehicle_id, vehicle_type, capacity, last_maintenance
            FROM vehicles
            WHERE vehicle_id = $1
            FOR UPDATE
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn save_maintenance_log(&mut self, log: &MaintenanceLog) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO maintenance_logs (id, vehicle_id, maintenance_date, description, cost)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(log.id)
        .bind(&log.vehicle_id)
        .bind(log.maintenance_date)
        .bind(&log.description)
        .bind(log.cost)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(e, "insert maintenance log"))?;

        Ok(())
    }

    async fn save_vehicle(&mut self, vehicle: &Vehicle) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET vehicle_type = $2, capacity = $3, last_maintenance = $4
            WHERE vehicle_id = $1
            "#,
        )
        .bind(&vehicle.vehicle_id)
        .bind(vehicle.vehicle_type.as_str())
        .bind(i64::from(vehicle.capacity))
        .bind(vehicle.last_maintenance)
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::MissingReference(format!(
                "vehicle '{}' does not exist",
                vehicle.vehicle_id
            )));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StorageResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
