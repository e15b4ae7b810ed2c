//! Schema de la flota
//!
//! Las cascadas viven en las foreign keys: borrar un vehículo elimina sus
//! asignaciones y logs, borrar una ruta elimina sus asignaciones.

pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        vehicle_id VARCHAR(10) PRIMARY KEY,
        vehicle_type VARCHAR(6) NOT NULL CHECK (vehicle_type IN ('BUS', 'TRAM', 'SUBWAY')),
        capacity BIGINT NOT NULL CHECK (capacity >= 0),
        last_maintenance DATE NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS routes (
        route_number VARCHAR(10) PRIMARY KEY,
        start_point VARCHAR(100) NOT NULL,
        end_point VARCHAR(100) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS route_assignments (
        id UUID PRIMARY KEY,
        vehicle_id VARCHAR(10) NOT NULL REFERENCES vehicles (vehicle_id) ON DELETE CASCADE,
        route_number VARCHAR(10) NOT NULL REFERENCES routes (route_number) ON DELETE CASCADE,
        driver_name VARCHAR(100) NOT NULL,
        start_time TIME NOT NULL,
        end_time TIME NOT NULL,
        UNIQUE (vehicle_id, start_time, end_time)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_route_assignments_route ON route_assignments (route_number, start_time)",
    r#"
    CREATE TABLE IF NOT EXISTS maintenance_logs (
        id UUID PRIMARY KEY,
        vehicle_id VARCHAR(10) NOT NULL REFERENCES vehicles (vehicle_id) ON DELETE CASCADE,
        maintenance_date DATE NOT NULL,
        description TEXT NOT NULL,
        cost NUMERIC(10, 2) NOT NULL CHECK (cost >= 0)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_maintenance_logs_vehicle ON maintenance_logs (vehicle_id, maintenance_date DESC)",
];
