//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod auth;
pub mod despacho;
pub mod transition;
pub mod viaje;
