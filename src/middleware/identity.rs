//! Identidad del llamador
//!
//! La autenticación vive en una capa externa que ya validó al usuario; acá
//! solo se leen los headers de identidad que esa capa inyecta. El rol se usa
//! únicamente para la compuerta de autorización de transiciones.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::models::auth::{CallerContext, UserRole};
use crate::utils::errors::AppError;

pub const CALLER_ID_HEADER: &str = "x-caller-id";
pub const CALLER_ROLE_HEADER: &str = "x-caller-role";

/// Extractor del contexto del llamador desde los headers de identidad
pub struct CallerIdentity(pub CallerContext);

#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller_id = parts
            .headers
            .get(CALLER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized(format!("Falta el header '{}'", CALLER_ID_HEADER))
            })?;

        let caller_id = Uuid::parse_str(caller_id).map_err(|_| {
            AppError::BadRequest(format!("'{}' no es un UUID válido", CALLER_ID_HEADER))
        })?;

        let role = parts
            .headers
            .get(CALLER_ROLE_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized(format!("Falta el header '{}'", CALLER_ROLE_HEADER))
            })?;

        let role = UserRole::from_str(role)
            .ok_or_else(|| AppError::Unauthorized(format!("Rol desconocido: '{}'", role)))?;

        Ok(CallerIdentity(CallerContext { caller_id, role }))
    }
}
