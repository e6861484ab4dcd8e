//! Repositorios de acceso a datos
//!
//! Implementaciones PostgreSQL sobre sqlx. El repositorio de viajes es
//! además la implementación productiva del puerto `ViajeStore`.

pub mod despacho_repository;
pub mod viaje_repository;

pub use despacho_repository::DespachoRepository;
pub use viaje_repository::ViajeRepository;
