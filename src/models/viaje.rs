//! Modelo de Viaje
//!
//! Un viaje es un movimiento físico de carga de origen a destino, rastreado
//! por la máquina de estados del ciclo de vida. Mapea exactamente a la tabla
//! `viajes` del schema PostgreSQL. Las referencias a transportista, chofer,
//! camión y acoplado son débiles: el viaje las consulta pero no es dueño de
//! su ciclo de vida.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::lifecycle::ViajeStatus;

/// Viaje principal - mapea exactamente a la tabla viajes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Viaje {
    pub id: Uuid,
    pub despacho_id: Uuid,
    pub status: ViajeStatus,
    /// Número de secuencia dentro del despacho (1..N para despachos multi-viaje)
    pub sequence_number: i32,
    pub carrier_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub trailer_id: Option<Uuid>,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    /// Estado desde el que se canceló; se escribe una sola vez al cancelar
    pub cancelled_from: Option<ViajeStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Viaje {
    /// El viaje ya no admite más transiciones
    pub fn is_closed(&self) -> bool {
        self.status.is_terminal()
    }
}
