//! Repositorios de la flota
//!
//! Contrato `FleetStorage` y sus implementaciones PostgreSQL y en memoria.

pub mod storage;
pub mod postgres_repository;
pub mod memory_repository;

pub use memory_repository::MemoryFleetRepository;
pub use postgres_repository::PgFleetRepository;
pub use storage::{FleetStorage, FleetTransaction, StorageResult};
