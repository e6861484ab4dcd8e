//! Controllers de la API

pub mod despacho_controller;
pub mod viaje_controller;

pub use despacho_controller::DespachoController;
pub use viaje_controller::ViajeController;
