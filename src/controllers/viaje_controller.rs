//! Controller de viajes
//!
//! Orquesta las operaciones sobre viajes: lectura con cálculos derivados,
//! pedido de transición, próximos estados para el rol del llamador e
//! historial de auditoría. No contiene reglas de transición propias.

use std::str::FromStr;
use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::despacho_dto::ApiResponse;
use crate::dto::viaje_dto::{
    NextStateInfo, NextStatesResponse, TransitionHistoryEntry, TransitionRequest, ViajeResponse,
};
use crate::lifecycle::{LifecycleRegistry, ViajeStatus};
use crate::models::auth::CallerContext;
use crate::services::store::ViajeStore;
use crate::services::viaje_state_service::{TransitionOutcome, ViajeStateService};
use crate::utils::errors::AppError;

pub struct ViajeController {
    store: Arc<dyn ViajeStore>,
    service: ViajeStateService,
    registry: LifecycleRegistry,
}

impl ViajeController {
    pub fn new(
        store: Arc<dyn ViajeStore>,
        service: ViajeStateService,
        registry: LifecycleRegistry,
    ) -> Self {
        Self {
            store,
            service,
            registry,
        }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ViajeResponse, AppError> {
        let viaje = self
            .store
            .load_viaje(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Viaje '{}' no encontrado", id)))?;

        Ok(ViajeResponse::from_viaje(viaje, &self.registry))
    }

    pub async fn transition(
        &self,
        id: Uuid,
        caller: &CallerContext,
        request: TransitionRequest,
    ) -> Result<ApiResponse<TransitionOutcome>, AppError> {
        request.validate()?;

        let requested = ViajeStatus::from_str(&request.to_status)
            .map_err(AppError::BadRequest)?;

        let outcome = self
            .service
            .apply_transition(id, requested, caller, request.note)
            .await?;

        Ok(ApiResponse::success_with_message(
            outcome,
            "Transición aplicada exitosamente".to_string(),
        ))
    }

    pub async fn next_states(
        &self,
        id: Uuid,
        caller: &CallerContext,
    ) -> Result<NextStatesResponse, AppError> {
        let viaje = self
            .store
            .load_viaje(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Viaje '{}' no encontrado", id)))?;

        let next_states = self
            .service
            .validator()
            .next_states_for_role(viaje.status, caller.role)
            .into_iter()
            .map(|status| NextStateInfo {
                status,
                label: status.label(),
            })
            .collect();

        Ok(NextStatesResponse {
            viaje_id: id,
            current_status: viaje.status,
            next_states,
        })
    }

    pub async fn history(&self, id: Uuid) -> Result<Vec<TransitionHistoryEntry>, AppError> {
        // Verificar que el viaje exista antes de listar
        self.store
            .load_viaje(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Viaje '{}' no encontrado", id)))?;

        let transitions = self.store.list_transitions(id).await?;
        Ok(transitions.into_iter().map(Into::into).collect())
    }
}
