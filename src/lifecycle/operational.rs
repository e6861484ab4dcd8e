//! Estado operacional derivado (a tiempo / demorado / vencido)
//!
//! Señal transitoria para la UI calculada en cada lectura a partir del
//! estado actual y la ventana horaria programada. Nunca se persiste como
//! estado del viaje.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::states::{ViajePhase, ViajeStatus};

/// Señal operacional derivada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalStatus {
    OnTime,
    Delayed,
    Expired,
    NotApplicable,
}

/// Ventanas de tolerancia para el cálculo operacional
#[derive(Debug, Clone, Copy)]
pub struct OperationalConfig {
    /// Tolerancia antes de marcar un viaje como demorado
    pub delay_tolerance: Duration,
    /// Umbral duro a partir del cual un viaje que nunca avanzó se considera vencido
    pub expiry_threshold: Duration,
}

impl Default for OperationalConfig {
    fn default() -> Self {
        Self {
            delay_tolerance: Duration::minutes(30),
            expiry_threshold: Duration::hours(12),
        }
    }
}

/// Calcula la señal operacional de un viaje.
///
/// Solo los viajes que todavía no arrancaron (fases de creación y
/// asignación) pueden estar demorados o vencidos; una vez en ruta la
/// ventana de salida ya no aplica.
pub fn operational_status(
    status: ViajeStatus,
    scheduled_start: DateTime<Utc>,
    now: DateTime<Utc>,
    config: &OperationalConfig,
) -> OperationalStatus {
    if status.is_terminal() {
        return OperationalStatus::NotApplicable;
    }

    let waiting_to_start = matches!(
        status.phase(),
        ViajePhase::Creation | ViajePhase::Assignment
    );
    if !waiting_to_start {
        return OperationalStatus::OnTime;
    }

    if now > scheduled_start + config.expiry_threshold {
        OperationalStatus::Expired
    } else if now > scheduled_start + config.delay_tolerance {
        OperationalStatus::Delayed
    } else {
        OperationalStatus::OnTime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> OperationalConfig {
        OperationalConfig {
            delay_tolerance: Duration::minutes(30),
            expiry_threshold: Duration::hours(12),
        }
    }

    #[test]
    fn test_terminal_states_not_applicable() {
        let start = Utc::now();
        let late = start + Duration::hours(48);
        assert_eq!(
            operational_status(ViajeStatus::Completed, start, late, &cfg()),
            OperationalStatus::NotApplicable
        );
        assert_eq!(
            operational_status(ViajeStatus::Cancelled, start, late, &cfg()),
            OperationalStatus::NotApplicable
        );
    }

    #[test]
    fn test_on_time_within_tolerance() {
        let start = Utc::now();
        let now = start + Duration::minutes(10);
        assert_eq!(
            operational_status(ViajeStatus::Pending, start, now, &cfg()),
            OperationalStatus::OnTime
        );
    }

    #[test]
    fn test_delayed_past_tolerance() {
        let start = Utc::now();
        let now = start + Duration::minutes(45);
        assert_eq!(
            operational_status(ViajeStatus::TruckAssigned, start, now, &cfg()),
            OperationalStatus::Delayed
        );
    }

    #[test]
    fn test_expired_past_hard_threshold() {
        let start = Utc::now();
        let now = start + Duration::hours(13);
        assert_eq!(
            operational_status(ViajeStatus::Pending, start, now, &cfg()),
            OperationalStatus::Expired
        );
    }

    #[test]
    fn test_in_route_trips_never_delayed() {
        let start = Utc::now();
        let now = start + Duration::hours(20);
        assert_eq!(
            operational_status(ViajeStatus::InTransitToDestination, start, now, &cfg()),
            OperationalStatus::OnTime
        );
    }
}
