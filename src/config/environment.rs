//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    /// Minutos de tolerancia antes de marcar un viaje como demorado
    pub delay_tolerance_minutes: i64,
    /// Horas desde la salida programada para considerar vencido un viaje que nunca avanzó
    pub expiry_threshold_hours: i64,
    /// Webhook de notificaciones (opcional; sin webhook solo se loguea)
    pub notify_webhook_url: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string())
                .collect(),
            delay_tolerance_minutes: env::var("DELAY_TOLERANCE_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("DELAY_TOLERANCE_MINUTES must be a valid number"),
            expiry_threshold_hours: env::var("EXPIRY_THRESHOLD_HOURS")
                .unwrap_or_else(|_| "12".to_string())
                .parse()
                .expect("EXPIRY_THRESHOLD_HOURS must be a valid number"),
            notify_webhook_url: env::var("NOTIFY_WEBHOOK_URL").ok(),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_url_uses_configured_host_and_port() {
        let config = EnvironmentConfig {
            environment: "development".to_string(),
            port: 8080,
            host: "127.0.0.1".to_string(),
            cors_origins: Vec::new(),
            delay_tolerance_minutes: 30,
            expiry_threshold_hours: 12,
            notify_webhook_url: None,
        };
        assert_eq!(config.server_url(), "127.0.0.1:8080");
        let addr: std::net::SocketAddr = config.server_url().parse().unwrap();
        assert_eq!(addr.port(), 8080);
    }
}
