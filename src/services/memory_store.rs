//! Implementación en memoria de los puertos
//!
//! Usada por los tests de integración y para desarrollo local sin base de
//! datos. Respeta el mismo contrato CAS que la implementación PostgreSQL:
//! el commit toma el lock de escritura, verifica que el estado esperado
//! siga vigente y aplica viaje, despacho y auditoría juntos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::lifecycle::ViajeStatus;
use crate::models::despacho::{Despacho, DespachoStatus};
use crate::models::transition::ViajeTransition;
use crate::models::viaje::Viaje;
use crate::services::store::{Notifier, TransitionCommit, ViajeStore};
use crate::utils::errors::{concurrent_modification_error, AppError};

#[derive(Default)]
pub struct MemoryStore {
    viajes: RwLock<HashMap<Uuid, Viaje>>,
    despachos: RwLock<HashMap<Uuid, Despacho>>,
    transitions: RwLock<Vec<ViajeTransition>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_despacho(&self, despacho: Despacho) {
        self.despachos.write().await.insert(despacho.id, despacho);
    }

    pub async fn insert_viaje(&self, viaje: Viaje) {
        self.viajes.write().await.insert(viaje.id, viaje);
    }

    pub async fn despacho(&self, id: Uuid) -> Option<Despacho> {
        self.despachos.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl ViajeStore for MemoryStore {
    async fn load_viaje(&self, id: Uuid) -> Result<Option<Viaje>, AppError> {
        Ok(self.viajes.read().await.get(&id).cloned())
    }

    async fn commit_transition(
        &self,
        commit: TransitionCommit,
    ) -> Result<DespachoStatus, AppError> {
        let mut viajes = self.viajes.write().await;
        let mut despachos = self.despachos.write().await;
        let mut transitions = self.transitions.write().await;

        let viaje = viajes
            .get_mut(&commit.viaje_id)
            .ok_or_else(|| AppError::NotFound(format!("Viaje '{}' no encontrado", commit.viaje_id)))?;

        // CAS: el estado leído por el orquestador tiene que seguir vigente
        if viaje.status != commit.expected_status {
            return Err(concurrent_modification_error(
                "Viaje",
                &commit.viaje_id.to_string(),
            ));
        }

        let now = Utc::now();
        viaje.status = commit.new_status;
        if let Some(from) = commit.cancelled_from {
            viaje.cancelled_from = Some(from);
        }
        viaje.updated_at = now;

        // Proyección sobre los estados vigentes, todavía bajo el lock de
        // escritura: ninguna transición concurrente puede meterse en el medio
        let statuses: Vec<ViajeStatus> = viajes
            .values()
            .filter(|v| v.despacho_id == commit.despacho_id)
            .map(|v| v.status)
            .collect();
        let despacho_status = DespachoStatus::from_viajes(&statuses);

        if let Some(despacho) = despachos.get_mut(&commit.despacho_id) {
            despacho.status = despacho_status;
            despacho.updated_at = now;
        }

        transitions.push(ViajeTransition {
            id: Uuid::new_v4(),
            viaje_id: commit.audit.viaje_id,
            from_status: commit.audit.from_status,
            to_status: commit.audit.to_status,
            actor_id: commit.audit.actor_id,
            actor_role: commit.audit.actor_role.as_str().to_string(),
            note: commit.audit.note,
            created_at: now,
        });

        Ok(despacho_status)
    }

    async fn list_transitions(&self, viaje_id: Uuid) -> Result<Vec<ViajeTransition>, AppError> {
        Ok(self
            .transitions
            .read()
            .await
            .iter()
            .filter(|t| t.viaje_id == viaje_id)
            .cloned()
            .collect())
    }
}

/// Notificador que solo cuenta entregas; para tests
#[derive(Default)]
pub struct CountingNotifier {
    pub delivered: AtomicUsize,
}

#[async_trait]
impl Notifier for CountingNotifier {
    async fn notify(
        &self,
        _viaje_id: Uuid,
        _from: ViajeStatus,
        _to: ViajeStatus,
    ) -> Result<(), AppError> {
        self.delivered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Notificador que siempre falla; para verificar que la transición no se ve
/// afectada por la notificación
#[derive(Default)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(
        &self,
        viaje_id: Uuid,
        _from: ViajeStatus,
        _to: ViajeStatus,
    ) -> Result<(), AppError> {
        Err(AppError::Internal(format!(
            "Notificación del viaje {} rechazada",
            viaje_id
        )))
    }
}
