//! Validador de transiciones
//!
//! Funciones puras sobre el registro: legalidad de una transición, próximos
//! estados (con y sin filtro de rol) y compuerta de autorización que usa el
//! orquestador. La autorización es distinta de la legalidad: una transición
//! puede existir en la tabla y estar vedada para el rol que la solicita.

use super::registry::LifecycleRegistry;
use super::states::ViajeStatus;
use crate::models::auth::UserRole;
use crate::utils::errors::AppError;

/// Validador de transiciones sobre un registro inmutable
#[derive(Debug, Clone)]
pub struct TransitionValidator {
    registry: LifecycleRegistry,
}

impl TransitionValidator {
    pub fn new(registry: LifecycleRegistry) -> Self {
        Self { registry }
    }

    /// Falla con `InvalidTransition` si `to` no es alcanzable desde `from`.
    /// Pedir el estado que ya se tiene también es inválido: la tabla no
    /// contiene auto-transiciones.
    pub fn validate_transition(
        &self,
        from: ViajeStatus,
        to: ViajeStatus,
    ) -> Result<(), AppError> {
        if self.registry.is_legal(from, to) {
            Ok(())
        } else {
            Err(AppError::InvalidTransition { from, to })
        }
    }

    /// Próximos estados legales desde `status`
    pub fn next_states_for(&self, status: ViajeStatus) -> Vec<ViajeStatus> {
        self.registry.legal_next_states(status)
    }

    /// Próximos estados legales desde `status` que `role` puede solicitar.
    /// Un resultado vacío es válido: el rol no tiene nada más que hacer aquí.
    pub fn next_states_for_role(&self, status: ViajeStatus, role: UserRole) -> Vec<ViajeStatus> {
        self.registry
            .legal_next_states(status)
            .into_iter()
            .filter(|to| self.registry.role_may_target(role, *to))
            .collect()
    }

    /// El rol tiene autoridad sobre el estado destino, sin mirar legalidad
    pub fn role_may_target(&self, role: UserRole, to: ViajeStatus) -> bool {
        self.registry.role_may_target(role, to)
    }

    /// Estado final: completed o cancelled
    pub fn is_final(&self, status: ViajeStatus) -> bool {
        self.registry.is_terminal(status)
    }

    /// Compuerta de autorización del orquestador: el rol puede llevar el
    /// viaje de `from` a `to`. Requiere que la transición además sea legal.
    pub fn can_role_act(&self, role: UserRole, from: ViajeStatus, to: ViajeStatus) -> bool {
        self.registry.is_legal(from, to) && self.registry.role_may_target(role, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> TransitionValidator {
        TransitionValidator::new(LifecycleRegistry::standard())
    }

    #[test]
    fn test_validate_forward_transition() {
        assert!(validator()
            .validate_transition(ViajeStatus::Pending, ViajeStatus::CarrierAssigned)
            .is_ok());
    }

    #[test]
    fn test_skip_fails_naming_both_endpoints() {
        let err = validator()
            .validate_transition(ViajeStatus::Pending, ViajeStatus::Loading)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("pending"));
        assert!(message.contains("loading"));
    }

    #[test]
    fn test_requesting_current_state_is_invalid() {
        let result =
            validator().validate_transition(ViajeStatus::Loading, ViajeStatus::Loading);
        assert!(matches!(
            result,
            Err(AppError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_role_gating_is_subset_of_legality() {
        let v = validator();
        for status in ViajeStatus::ALL {
            let legal = v.next_states_for(status);
            for role in UserRole::ALL {
                for to in v.next_states_for_role(status, role) {
                    assert!(legal.contains(&to));
                }
            }
        }
    }

    #[test]
    fn test_driver_has_nothing_to_do_at_loading() {
        // loading -> loaded es movimiento de patio; el chofer no participa
        // y tampoco puede cancelar. Conjunto vacío, no error.
        let next = validator().next_states_for_role(ViajeStatus::Loading, UserRole::Driver);
        assert!(next.is_empty());
    }

    #[test]
    fn test_can_role_act_requires_both_legality_and_authority() {
        let v = validator();
        // Legal pero sin autoridad
        assert!(!v.can_role_act(
            UserRole::Driver,
            ViajeStatus::DepartedDestination,
            ViajeStatus::Completed
        ));
        // Autoridad pero ilegal
        assert!(!v.can_role_act(
            UserRole::Admin,
            ViajeStatus::Completed,
            ViajeStatus::Cancelled
        ));
        // Ambas
        assert!(v.can_role_act(
            UserRole::Supervisor,
            ViajeStatus::DriverConfirmed,
            ViajeStatus::Cancelled
        ));
    }

    #[test]
    fn test_is_final() {
        let v = validator();
        assert!(v.is_final(ViajeStatus::Completed));
        assert!(v.is_final(ViajeStatus::Cancelled));
        assert!(!v.is_final(ViajeStatus::Unloaded));
    }
}
