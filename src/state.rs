//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El registro de ciclo de vida se construye
//! una sola vez acá y se inyecta en el validador y el servicio; no es un
//! global ambiente.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::controllers::{DespachoController, ViajeController};
use crate::lifecycle::{LifecycleRegistry, OperationalConfig};
use crate::repositories::{DespachoRepository, ViajeRepository};
use crate::services::notification_service::NotificationService;
use crate::services::store::{Notifier, ViajeStore};
use crate::services::viaje_state_service::ViajeStateService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub registry: LifecycleRegistry,
    pub store: Arc<dyn ViajeStore>,
    pub service: ViajeStateService,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let registry = LifecycleRegistry::new(OperationalConfig {
            delay_tolerance: chrono::Duration::minutes(config.delay_tolerance_minutes),
            expiry_threshold: chrono::Duration::hours(config.expiry_threshold_hours),
        });

        let store: Arc<dyn ViajeStore> = Arc::new(ViajeRepository::new(pool.clone()));
        let notifier: Arc<dyn Notifier> =
            Arc::new(NotificationService::new(config.notify_webhook_url.clone()));
        let service = ViajeStateService::new(Arc::clone(&store), notifier, registry.clone());

        Self {
            pool,
            config,
            registry,
            store,
            service,
        }
    }

    pub fn viaje_controller(&self) -> ViajeController {
        ViajeController::new(
            Arc::clone(&self.store),
            self.service.clone(),
            self.registry.clone(),
        )
    }

    pub fn despacho_controller(&self) -> DespachoController {
        DespachoController::new(
            DespachoRepository::new(self.pool.clone()),
            ViajeRepository::new(self.pool.clone()),
            self.registry.clone(),
        )
    }
}
