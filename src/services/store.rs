//! Puertos de persistencia y notificación
//!
//! Interfaces angostas que el orquestador consume. La escritura de la
//! transición es UNA unidad de trabajo: el CAS sobre el estado del viaje,
//! la proyección del despacho y el registro de auditoría se confirman
//! juntos o no se confirma nada.

use async_trait::async_trait;
use uuid::Uuid;

use crate::lifecycle::ViajeStatus;
use crate::models::despacho::DespachoStatus;
use crate::models::transition::{NewViajeTransition, ViajeTransition};
use crate::models::viaje::Viaje;
use crate::utils::errors::AppError;

/// Unidad de trabajo de una transición validada
#[derive(Debug, Clone)]
pub struct TransitionCommit {
    pub viaje_id: Uuid,
    /// Estado que el orquestador leyó; el CAS exige que siga vigente
    pub expected_status: ViajeStatus,
    pub new_status: ViajeStatus,
    /// Solo al cancelar: estado desde el que se cancela, congelado en el viaje
    pub cancelled_from: Option<ViajeStatus>,
    pub despacho_id: Uuid,
    pub audit: NewViajeTransition,
}

/// Puerto de lectura/escritura de viajes
#[async_trait]
pub trait ViajeStore: Send + Sync {
    async fn load_viaje(&self, id: Uuid) -> Result<Option<Viaje>, AppError>;

    /// Confirma la transición de forma atómica y devuelve la proyección del
    /// despacho recalculada DENTRO de la misma unidad de trabajo: la
    /// proyección se deriva de los estados vigentes al momento del commit,
    /// nunca de una lectura previa. Si el estado esperado ya no está vigente
    /// devuelve `ConcurrentModification`; el perdedor de la carrera debe
    /// recargar y reintentar, nunca pisar.
    async fn commit_transition(&self, commit: TransitionCommit)
        -> Result<DespachoStatus, AppError>;

    /// Historial de auditoría del viaje, ordenado por commit
    async fn list_transitions(&self, viaje_id: Uuid) -> Result<Vec<ViajeTransition>, AppError>;
}

/// Puerto de notificación fire-and-forget
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        viaje_id: Uuid,
        from: ViajeStatus,
        to: ViajeStatus,
    ) -> Result<(), AppError>;
}
