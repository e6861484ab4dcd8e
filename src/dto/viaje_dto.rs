//! DTOs de viaje

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::lifecycle::{LifecycleRegistry, OperationalStatus, ViajePhase, ViajeStatus};
use crate::models::transition::ViajeTransition;
use crate::models::viaje::Viaje;

/// Request para transicionar un viaje
#[derive(Debug, Deserialize, Validate)]
pub struct TransitionRequest {
    /// Estado destino en formato snake_case (ej: "carrier_assigned")
    pub to_status: String,

    #[validate(length(max = 500))]
    pub note: Option<String>,
}

/// Response de viaje con los cálculos derivados
#[derive(Debug, Serialize)]
pub struct ViajeResponse {
    pub id: Uuid,
    pub despacho_id: Uuid,
    pub status: ViajeStatus,
    pub status_label: &'static str,
    pub status_color: &'static str,
    pub phase: ViajePhase,
    pub progress: u8,
    pub operational_status: OperationalStatus,
    pub sequence_number: i32,
    pub carrier_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub trailer_id: Option<Uuid>,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub cancelled_from: Option<ViajeStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ViajeResponse {
    /// Arma la response recalculando progreso y señal operacional; la señal
    /// es de solo lectura y nunca se persiste.
    pub fn from_viaje(viaje: Viaje, registry: &LifecycleRegistry) -> Self {
        let operational_status =
            registry.operational_status(viaje.status, viaje.scheduled_start, Utc::now());
        Self {
            id: viaje.id,
            despacho_id: viaje.despacho_id,
            status: viaje.status,
            status_label: viaje.status.label(),
            status_color: viaje.status.color(),
            phase: viaje.status.phase(),
            progress: registry.progress_of_viaje(viaje.status, viaje.cancelled_from),
            operational_status,
            sequence_number: viaje.sequence_number,
            carrier_id: viaje.carrier_id,
            driver_id: viaje.driver_id,
            vehicle_id: viaje.vehicle_id,
            trailer_id: viaje.trailer_id,
            scheduled_start: viaje.scheduled_start,
            scheduled_end: viaje.scheduled_end,
            cancelled_from: viaje.cancelled_from,
            created_at: viaje.created_at,
            updated_at: viaje.updated_at,
        }
    }
}

/// Un estado alcanzable desde el estado actual
#[derive(Debug, Serialize)]
pub struct NextStateInfo {
    pub status: ViajeStatus,
    pub label: &'static str,
}

/// Response de próximos estados para el rol del llamador
#[derive(Debug, Serialize)]
pub struct NextStatesResponse {
    pub viaje_id: Uuid,
    pub current_status: ViajeStatus,
    pub next_states: Vec<NextStateInfo>,
}

/// Fila del historial de transiciones
#[derive(Debug, Serialize)]
pub struct TransitionHistoryEntry {
    pub from_status: ViajeStatus,
    pub to_status: ViajeStatus,
    pub actor_id: Uuid,
    pub actor_role: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ViajeTransition> for TransitionHistoryEntry {
    fn from(t: ViajeTransition) -> Self {
        Self {
            from_status: t.from_status,
            to_status: t.to_status,
            actor_id: t.actor_id,
            actor_role: t.actor_role,
            note: t.note,
            created_at: t.created_at,
        }
    }
}
