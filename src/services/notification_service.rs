//! Servicio de notificaciones
//!
//! Notificación best-effort de cambios de estado a las partes interesadas
//! (chofer, empresa contraparte). Si hay un webhook configurado se hace un
//! único POST con timeout corto; sin webhook solo se loguea. La entrega no
//! es durable: no hay cola ni reintentos.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::lifecycle::ViajeStatus;
use crate::services::store::Notifier;
use crate::utils::errors::AppError;

pub struct NotificationService {
    http_client: reqwest::Client,
    webhook_url: Option<String>,
}

impl NotificationService {
    pub fn new(webhook_url: Option<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            webhook_url,
        }
    }
}

#[async_trait]
impl Notifier for NotificationService {
    async fn notify(
        &self,
        viaje_id: Uuid,
        from: ViajeStatus,
        to: ViajeStatus,
    ) -> Result<(), AppError> {
        let Some(url) = &self.webhook_url else {
            info!("📣 Viaje {} cambió de {} a {} (sin webhook configurado)", viaje_id, from, to);
            return Ok(());
        };

        let payload = json!({
            "viaje_id": viaje_id,
            "from_status": from.to_string(),
            "to_status": to.to_string(),
            "occurred_at": chrono::Utc::now().to_rfc3339(),
        });

        let response = self
            .http_client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Webhook no disponible: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "Webhook respondió {}",
                response.status()
            )));
        }

        info!("📣 Notificación enviada: viaje {} ({} -> {})", viaje_id, from, to);
        Ok(())
    }
}
