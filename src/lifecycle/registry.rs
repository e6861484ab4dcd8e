//! Registro de ciclo de vida
//!
//! Valor inmutable construido una sola vez en el arranque e inyectado en el
//! validador y el servicio de transiciones. Es la única puerta de entrada a
//! las tablas de estados, transiciones y roles; ningún otro componente debe
//! reimplementar estas reglas.

use chrono::{DateTime, Utc};

use super::operational::{operational_status, OperationalConfig, OperationalStatus};
use super::progress::{progress_of, progress_of_viaje};
use super::roles::{role_may_target, roles_for_target};
use super::states::{ViajePhase, ViajeStatus};
use super::transitions::{is_legal, legal_next_states};
use crate::models::auth::UserRole;

/// Registro inmutable de reglas del ciclo de vida del viaje
#[derive(Debug, Clone)]
pub struct LifecycleRegistry {
    operational: OperationalConfig,
}

impl LifecycleRegistry {
    /// Construye el registro estándar con las ventanas operacionales dadas
    pub fn new(operational: OperationalConfig) -> Self {
        Self { operational }
    }

    /// Registro con las ventanas operacionales por defecto
    pub fn standard() -> Self {
        Self::new(OperationalConfig::default())
    }

    pub fn is_terminal(&self, status: ViajeStatus) -> bool {
        status.is_terminal()
    }

    pub fn phase_of(&self, status: ViajeStatus) -> ViajePhase {
        status.phase()
    }

    pub fn legal_next_states(&self, status: ViajeStatus) -> Vec<ViajeStatus> {
        legal_next_states(status)
    }

    pub fn is_legal(&self, from: ViajeStatus, to: ViajeStatus) -> bool {
        is_legal(from, to)
    }

    pub fn roles_for_target(&self, to: ViajeStatus) -> &'static [UserRole] {
        roles_for_target(to)
    }

    pub fn role_may_target(&self, role: UserRole, to: ViajeStatus) -> bool {
        role_may_target(role, to)
    }

    pub fn progress_of(&self, status: ViajeStatus) -> u8 {
        progress_of(status)
    }

    pub fn progress_of_viaje(
        &self,
        status: ViajeStatus,
        cancelled_from: Option<ViajeStatus>,
    ) -> u8 {
        progress_of_viaje(status, cancelled_from)
    }

    /// Señal operacional derivada, calculada con las ventanas del registro
    pub fn operational_status(
        &self,
        status: ViajeStatus,
        scheduled_start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> OperationalStatus {
        operational_status(status, scheduled_start, now, &self.operational)
    }
}

impl Default for LifecycleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
