//! Cálculo de progreso del viaje
//!
//! Porcentaje de avance [0, 100] estrictamente creciente a lo largo de la
//! cadena canónica de estados. Para viajes cancelados el porcentaje queda
//! congelado en el estado desde el que se canceló (convención de producto);
//! la función cruda devuelve 0 como centinela cuando ese estado no se conoce.

use super::states::ViajeStatus;

/// Progreso [0, 100] para un estado de la cadena de avance.
/// `Cancelled` devuelve el centinela 0; ver [`progress_of_viaje`].
pub fn progress_of(status: ViajeStatus) -> u8 {
    match status {
        ViajeStatus::Pending => 0,
        ViajeStatus::CarrierAssigned => 6,
        ViajeStatus::TruckAssigned => 12,
        ViajeStatus::DriverConfirmed => 18,
        ViajeStatus::InTransitToOrigin => 25,
        ViajeStatus::ArrivedOrigin => 31,
        ViajeStatus::LoadingCalled => 37,
        ViajeStatus::Loading => 43,
        ViajeStatus::Loaded => 50,
        ViajeStatus::DepartedOrigin => 56,
        ViajeStatus::InTransitToDestination => 62,
        ViajeStatus::ArrivedDestination => 68,
        ViajeStatus::UnloadingCalled => 75,
        ViajeStatus::Unloading => 81,
        ViajeStatus::Unloaded => 87,
        ViajeStatus::DepartedDestination => 93,
        ViajeStatus::Completed => 100,
        ViajeStatus::Cancelled => 0,
    }
}

/// Progreso a nivel viaje: para viajes cancelados reporta el porcentaje
/// congelado en `cancelled_from` (el estado previo a la cancelación).
pub fn progress_of_viaje(status: ViajeStatus, cancelled_from: Option<ViajeStatus>) -> u8 {
    match (status, cancelled_from) {
        (ViajeStatus::Cancelled, Some(previous)) => progress_of(previous),
        _ => progress_of(status),
    }
}

#[cfg(test)]
mod tests {
    use super::super::transitions::forward_next;
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(progress_of(ViajeStatus::Pending), 0);
        assert_eq!(progress_of(ViajeStatus::Completed), 100);
    }

    #[test]
    fn test_strictly_increasing_along_forward_chain() {
        let mut current = ViajeStatus::Pending;
        while let Some(next) = forward_next(current) {
            assert!(
                progress_of(next) > progress_of(current),
                "{current} -> {next} no incrementa el progreso"
            );
            current = next;
        }
    }

    #[test]
    fn test_cancelled_freezes_previous_progress() {
        let frozen = progress_of_viaje(ViajeStatus::Cancelled, Some(ViajeStatus::Loaded));
        assert_eq!(frozen, progress_of(ViajeStatus::Loaded));
    }

    #[test]
    fn test_cancelled_without_origin_reports_sentinel() {
        assert_eq!(progress_of_viaje(ViajeStatus::Cancelled, None), 0);
    }
}
