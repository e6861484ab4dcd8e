//! Backend de despachos de carga
//!
//! Servicio que coordina el ciclo de vida de un viaje de carga a través de
//! su cadena de 17 estados operativos más la cancelación terminal, y
//! mantiene el despacho asociado sincronizado con el estado de sus viajes.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod lifecycle;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
