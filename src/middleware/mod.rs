//! Middleware de la aplicación

pub mod cors;
pub mod identity;
