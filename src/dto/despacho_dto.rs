//! DTOs de despacho

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::viaje_dto::ViajeResponse;
use crate::models::despacho::{Despacho, DespachoStatus};

/// Request para crear un despacho con sus viajes
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDespachoRequest {
    #[validate(length(min = 3, max = 50))]
    pub reference: String,

    #[validate(length(min = 2, max = 200))]
    pub origin: String,

    #[validate(length(min = 2, max = 200))]
    pub destination: String,

    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,

    /// Cantidad de viajes que cumplen el despacho (1 para el caso común)
    #[validate(range(min = 1, max = 20))]
    pub viaje_count: Option<i32>,
}

/// Response de despacho para la API
#[derive(Debug, Serialize)]
pub struct DespachoResponse {
    pub id: Uuid,
    pub reference: String,
    pub origin: String,
    pub destination: String,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub status: DespachoStatus,
    pub viajes: Vec<ViajeResponse>,
    pub created_at: DateTime<Utc>,
}

impl DespachoResponse {
    pub fn from_despacho(despacho: Despacho, viajes: Vec<ViajeResponse>) -> Self {
        Self {
            id: despacho.id,
            reference: despacho.reference,
            origin: despacho.origin,
            destination: despacho.destination,
            scheduled_start: despacho.scheduled_start,
            scheduled_end: despacho.scheduled_end,
            status: despacho.status,
            viajes,
            created_at: despacho.created_at,
        }
    }
}

/// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
