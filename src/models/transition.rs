//! Registro de auditoría de transiciones
//!
//! Hecho inmutable append-only: una fila por transición exitosa en la tabla
//! `viaje_transitions`. Nunca se actualiza ni se borra.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::lifecycle::ViajeStatus;
use crate::models::auth::UserRole;

/// Fila de auditoría - mapea exactamente a la tabla viaje_transitions
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ViajeTransition {
    pub id: Uuid,
    pub viaje_id: Uuid,
    pub from_status: ViajeStatus,
    pub to_status: ViajeStatus,
    pub actor_id: Uuid,
    pub actor_role: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Datos para insertar un registro de auditoría nuevo
#[derive(Debug, Clone)]
pub struct NewViajeTransition {
    pub viaje_id: Uuid,
    pub from_status: ViajeStatus,
    pub to_status: ViajeStatus,
    pub actor_id: Uuid,
    pub actor_role: UserRole,
    pub note: Option<String>,
}
