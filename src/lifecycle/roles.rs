//! Mapa de autorización por rol
//!
//! Asocia cada estado destino con los roles que pueden solicitar la
//! transición hacia él. Es independiente de la legalidad topológica: una
//! transición puede existir en la tabla y aun así estar vedada para un rol.

use super::states::ViajeStatus;
use crate::models::auth::UserRole;

/// Roles autorizados a llevar un viaje hacia `to`.
///
/// Admin puede todo. Dispatcher maneja asignación, tránsito y cierre.
/// AccessControl (portería) maneja los movimientos de patio en origen y
/// destino. Supervisor puede operar patio, cerrar y cancelar. Driver solo
/// reporta sus propios movimientos (confirmación, tránsito, arribos y
/// salidas); nunca cierra ni cancela.
pub fn roles_for_target(to: ViajeStatus) -> &'static [UserRole] {
    use UserRole::*;
    match to {
        // Sin transiciones entrantes: pending es el estado inicial
        ViajeStatus::Pending => &[],

        // Fase de asignación
        ViajeStatus::CarrierAssigned => &[Dispatcher, Admin],
        ViajeStatus::TruckAssigned => &[Dispatcher, Admin],
        ViajeStatus::DriverConfirmed => &[Driver, Dispatcher, Admin],

        // Tránsito a origen y arribo
        ViajeStatus::InTransitToOrigin => &[Driver, Dispatcher, Admin],
        ViajeStatus::ArrivedOrigin => &[Driver, AccessControl, Dispatcher, Admin],

        // Patio de origen
        ViajeStatus::LoadingCalled => &[AccessControl, Supervisor, Admin],
        ViajeStatus::Loading => &[AccessControl, Supervisor, Admin],
        ViajeStatus::Loaded => &[AccessControl, Supervisor, Admin],
        ViajeStatus::DepartedOrigin => &[Driver, AccessControl, Supervisor, Admin],

        // Tránsito a destino y arribo
        ViajeStatus::InTransitToDestination => &[Driver, Dispatcher, Admin],
        ViajeStatus::ArrivedDestination => &[Driver, AccessControl, Dispatcher, Admin],

        // Patio de destino
        ViajeStatus::UnloadingCalled => &[AccessControl, Supervisor, Admin],
        ViajeStatus::Unloading => &[AccessControl, Supervisor, Admin],
        ViajeStatus::Unloaded => &[AccessControl, Supervisor, Admin],
        ViajeStatus::DepartedDestination => &[Driver, AccessControl, Supervisor, Admin],

        // Cierre y cancelación
        ViajeStatus::Completed => &[Dispatcher, Supervisor, Admin],
        ViajeStatus::Cancelled => &[Dispatcher, Supervisor, Admin],
    }
}

/// Verifica si `role` tiene autoridad para llevar un viaje hacia `to`
pub fn role_may_target(role: UserRole, to: ViajeStatus) -> bool {
    roles_for_target(to).contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_may_target_every_reachable_state() {
        for status in ViajeStatus::ALL {
            if status != ViajeStatus::Pending {
                assert!(role_may_target(UserRole::Admin, status));
            }
        }
    }

    #[test]
    fn test_driver_cannot_close_or_cancel() {
        assert!(!role_may_target(UserRole::Driver, ViajeStatus::Completed));
        assert!(!role_may_target(UserRole::Driver, ViajeStatus::Cancelled));
    }

    #[test]
    fn test_supervisor_may_cancel() {
        assert!(role_may_target(UserRole::Supervisor, ViajeStatus::Cancelled));
    }

    #[test]
    fn test_access_control_limited_to_yard_movements() {
        assert!(role_may_target(UserRole::AccessControl, ViajeStatus::Loading));
        assert!(!role_may_target(UserRole::AccessControl, ViajeStatus::CarrierAssigned));
        assert!(!role_may_target(UserRole::AccessControl, ViajeStatus::Completed));
    }

    #[test]
    fn test_nobody_targets_pending() {
        for role in UserRole::ALL {
            assert!(!role_may_target(role, ViajeStatus::Pending));
        }
    }
}
