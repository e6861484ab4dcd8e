//! Modelo de Despacho
//!
//! El despacho es la unidad comercial que pidió el cliente; lo cumplen uno o
//! más viajes. Su estado visible NO es un estado independiente: es una
//! proyección pura de los estados de sus viajes, recalculada y persistida en
//! cada transición exitosa por el servicio de transiciones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::lifecycle::ViajeStatus;

/// Estado derivado del despacho - mapea al ENUM despacho_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "despacho_status", rename_all = "snake_case")]
pub enum DespachoStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl DespachoStatus {
    /// Proyección f: estados de los viajes -> estado visible del despacho.
    ///
    /// - sin viajes o todos en `pending`: `pending`
    /// - todos terminales: `completed` si alguno completó, si no `cancelled`
    /// - cualquier otra mezcla: `in_progress`
    pub fn from_viajes(statuses: &[ViajeStatus]) -> Self {
        if statuses.is_empty() || statuses.iter().all(|s| *s == ViajeStatus::Pending) {
            return DespachoStatus::Pending;
        }

        if statuses.iter().all(|s| s.is_terminal()) {
            return if statuses.iter().any(|s| *s == ViajeStatus::Completed) {
                DespachoStatus::Completed
            } else {
                DespachoStatus::Cancelled
            };
        }

        DespachoStatus::InProgress
    }
}

/// Despacho principal - mapea exactamente a la tabla despachos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Despacho {
    pub id: Uuid,
    /// Código de referencia comercial (ej: "DSP-2026-00153")
    pub reference: String,
    pub origin: String,
    pub destination: String,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub status: DespachoStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_despacho_is_pending() {
        assert_eq!(DespachoStatus::from_viajes(&[]), DespachoStatus::Pending);
    }

    #[test]
    fn test_all_pending_is_pending() {
        let statuses = [ViajeStatus::Pending, ViajeStatus::Pending];
        assert_eq!(
            DespachoStatus::from_viajes(&statuses),
            DespachoStatus::Pending
        );
    }

    #[test]
    fn test_any_advanced_viaje_is_in_progress() {
        let statuses = [ViajeStatus::Pending, ViajeStatus::Loading];
        assert_eq!(
            DespachoStatus::from_viajes(&statuses),
            DespachoStatus::InProgress
        );
    }

    #[test]
    fn test_all_completed_is_completed() {
        let statuses = [ViajeStatus::Completed, ViajeStatus::Completed];
        assert_eq!(
            DespachoStatus::from_viajes(&statuses),
            DespachoStatus::Completed
        );
    }

    #[test]
    fn test_mixed_terminal_counts_as_completed() {
        let statuses = [ViajeStatus::Completed, ViajeStatus::Cancelled];
        assert_eq!(
            DespachoStatus::from_viajes(&statuses),
            DespachoStatus::Completed
        );
    }

    #[test]
    fn test_all_cancelled_is_cancelled() {
        let statuses = [ViajeStatus::Cancelled, ViajeStatus::Cancelled];
        assert_eq!(
            DespachoStatus::from_viajes(&statuses),
            DespachoStatus::Cancelled
        );
    }

    #[test]
    fn test_terminal_plus_pending_is_in_progress() {
        let statuses = [ViajeStatus::Completed, ViajeStatus::Pending];
        assert_eq!(
            DespachoStatus::from_viajes(&statuses),
            DespachoStatus::InProgress
        );
    }

    #[test]
    fn test_cancelled_plus_active_is_in_progress() {
        let statuses = [ViajeStatus::Cancelled, ViajeStatus::InTransitToDestination];
        assert_eq!(
            DespachoStatus::from_viajes(&statuses),
            DespachoStatus::InProgress
        );
    }
}
