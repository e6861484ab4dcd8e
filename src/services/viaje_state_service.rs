//! Servicio de transiciones del viaje
//!
//! Único componente con autoridad de escritura sobre el estado de un viaje.
//! Dado un pedido de transición: valida legalidad y rol, confirma el nuevo
//! estado con CAS, sincroniza la proyección del despacho, agrega el registro
//! de auditoría y dispara la notificación best-effort.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::lifecycle::{LifecycleRegistry, TransitionValidator, ViajeStatus};
use crate::models::auth::CallerContext;
use crate::models::despacho::DespachoStatus;
use crate::models::transition::NewViajeTransition;
use crate::services::store::{Notifier, TransitionCommit, ViajeStore};
use crate::utils::errors::AppError;

/// Resultado de una transición exitosa
#[derive(Debug, Clone, serde::Serialize)]
pub struct TransitionOutcome {
    pub viaje_id: Uuid,
    pub previous_status: ViajeStatus,
    pub new_status: ViajeStatus,
    pub despacho_status: DespachoStatus,
}

/// Orquestador de transiciones de estado
#[derive(Clone)]
pub struct ViajeStateService {
    store: Arc<dyn ViajeStore>,
    notifier: Arc<dyn Notifier>,
    validator: TransitionValidator,
}

impl ViajeStateService {
    pub fn new(
        store: Arc<dyn ViajeStore>,
        notifier: Arc<dyn Notifier>,
        registry: LifecycleRegistry,
    ) -> Self {
        Self {
            store,
            notifier,
            validator: TransitionValidator::new(registry),
        }
    }

    pub fn validator(&self) -> &TransitionValidator {
        &self.validator
    }

    /// Aplica una transición de estado sobre un viaje.
    ///
    /// Orden de verificación: existencia, estado terminal, autoridad del
    /// rol, legalidad de la transición. Un viaje cerrado rechaza cualquier
    /// pedido como transición inválida, sin importar el rol.
    pub async fn apply_transition(
        &self,
        viaje_id: Uuid,
        requested: ViajeStatus,
        caller: &CallerContext,
        note: Option<String>,
    ) -> Result<TransitionOutcome, AppError> {
        let viaje = self
            .store
            .load_viaje(viaje_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Viaje '{}' no encontrado", viaje_id)))?;

        let current = viaje.status;

        if current.is_terminal() {
            return Err(AppError::InvalidTransition {
                from: current,
                to: requested,
            });
        }

        if !self.validator.role_may_target(caller.role, requested) {
            return Err(AppError::Unauthorized(format!(
                "El rol '{}' no puede llevar el viaje de {} a {}",
                caller.role, current, requested
            )));
        }

        self.validator.validate_transition(current, requested)?;

        let commit = TransitionCommit {
            viaje_id,
            expected_status: current,
            new_status: requested,
            cancelled_from: (requested == ViajeStatus::Cancelled).then_some(current),
            despacho_id: viaje.despacho_id,
            audit: NewViajeTransition {
                viaje_id,
                from_status: current,
                to_status: requested,
                actor_id: caller.caller_id,
                actor_role: caller.role,
                note,
            },
        };

        // La proyección del despacho se recalcula dentro del commit, sobre
        // los estados vigentes en ese momento; una lectura previa podría
        // quedar vieja frente a una transición concurrente de otro viaje.
        let despacho_status = self.store.commit_transition(commit).await?;

        info!(
            "✅ Viaje {} transicionado: {} -> {} (rol {}, despacho {})",
            viaje_id, current, requested, caller.role, despacho_status_str(despacho_status)
        );

        self.dispatch_notification(viaje_id, current, requested);

        Ok(TransitionOutcome {
            viaje_id,
            previous_status: current,
            new_status: requested,
            despacho_status,
        })
    }

    /// Notificación en tarea desacoplada: su falla se loguea y se descarta,
    /// nunca afecta el resultado de la transición.
    fn dispatch_notification(&self, viaje_id: Uuid, from: ViajeStatus, to: ViajeStatus) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(viaje_id, from, to).await {
                warn!(
                    "📣 Falló la notificación del viaje {} ({} -> {}): {}",
                    viaje_id, from, to, e
                );
            }
        });
    }
}

fn despacho_status_str(status: DespachoStatus) -> &'static str {
    match status {
        DespachoStatus::Pending => "pending",
        DespachoStatus::InProgress => "in_progress",
        DespachoStatus::Completed => "completed",
        DespachoStatus::Cancelled => "cancelled",
    }
}
