//! Tabla de transiciones del viaje
//!
//! Grafo dirigido estático: para cada estado, los estados alcanzables en un
//! paso. La cadena de avance es estrictamente lineal (sin saltos) y todo
//! estado no terminal puede escapar a `cancelled`. Los estados terminales no
//! tienen transiciones salientes.

use super::states::ViajeStatus;

/// Siguiente estado en la cadena lineal de avance, si existe
pub fn forward_next(status: ViajeStatus) -> Option<ViajeStatus> {
    match status {
        ViajeStatus::Pending => Some(ViajeStatus::CarrierAssigned),
        ViajeStatus::CarrierAssigned => Some(ViajeStatus::TruckAssigned),
        ViajeStatus::TruckAssigned => Some(ViajeStatus::DriverConfirmed),
        ViajeStatus::DriverConfirmed => Some(ViajeStatus::InTransitToOrigin),
        ViajeStatus::InTransitToOrigin => Some(ViajeStatus::ArrivedOrigin),
        ViajeStatus::ArrivedOrigin => Some(ViajeStatus::LoadingCalled),
        ViajeStatus::LoadingCalled => Some(ViajeStatus::Loading),
        ViajeStatus::Loading => Some(ViajeStatus::Loaded),
        ViajeStatus::Loaded => Some(ViajeStatus::DepartedOrigin),
        ViajeStatus::DepartedOrigin => Some(ViajeStatus::InTransitToDestination),
        ViajeStatus::InTransitToDestination => Some(ViajeStatus::ArrivedDestination),
        ViajeStatus::ArrivedDestination => Some(ViajeStatus::UnloadingCalled),
        ViajeStatus::UnloadingCalled => Some(ViajeStatus::Unloading),
        ViajeStatus::Unloading => Some(ViajeStatus::Unloaded),
        ViajeStatus::Unloaded => Some(ViajeStatus::DepartedDestination),
        ViajeStatus::DepartedDestination => Some(ViajeStatus::Completed),
        ViajeStatus::Completed | ViajeStatus::Cancelled => None,
    }
}

/// Estados legales alcanzables en un paso desde `status`.
/// Para estados no terminales incluye siempre la salida a `cancelled`.
pub fn legal_next_states(status: ViajeStatus) -> Vec<ViajeStatus> {
    if status.is_terminal() {
        return Vec::new();
    }

    let mut next = Vec::with_capacity(2);
    if let Some(forward) = forward_next(status) {
        next.push(forward);
    }
    next.push(ViajeStatus::Cancelled);
    next
}

/// Verifica si la transición `from -> to` existe en la tabla
pub fn is_legal(from: ViajeStatus, to: ViajeStatus) -> bool {
    legal_next_states(from).contains(&to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_non_terminal_can_cancel() {
        for status in ViajeStatus::ALL {
            if !status.is_terminal() {
                assert!(
                    legal_next_states(status).contains(&ViajeStatus::Cancelled),
                    "{status} debería poder cancelarse"
                );
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        assert!(legal_next_states(ViajeStatus::Completed).is_empty());
        assert!(legal_next_states(ViajeStatus::Cancelled).is_empty());
    }

    #[test]
    fn test_forward_chain_covers_all_states() {
        // Siguiendo forward_next desde pending se recorren los 17 estados
        // de la cadena lineal, terminando en completed.
        let mut visited = vec![ViajeStatus::Pending];
        let mut current = ViajeStatus::Pending;
        while let Some(next) = forward_next(current) {
            visited.push(next);
            current = next;
        }
        assert_eq!(current, ViajeStatus::Completed);
        assert_eq!(visited.len(), 17);
    }

    #[test]
    fn test_no_skips_allowed() {
        assert!(!is_legal(ViajeStatus::Pending, ViajeStatus::Loading));
        assert!(!is_legal(ViajeStatus::ArrivedOrigin, ViajeStatus::Loaded));
        assert!(!is_legal(ViajeStatus::Loading, ViajeStatus::Completed));
    }

    #[test]
    fn test_no_self_transitions() {
        for status in ViajeStatus::ALL {
            assert!(!is_legal(status, status));
        }
    }

    #[test]
    fn test_no_backwards_transitions() {
        assert!(!is_legal(ViajeStatus::Loaded, ViajeStatus::Loading));
        assert!(!is_legal(ViajeStatus::Completed, ViajeStatus::DepartedDestination));
    }
}
