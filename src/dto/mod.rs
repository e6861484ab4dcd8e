//! DTOs de la API

pub mod despacho_dto;
pub mod viaje_dto;
