//! Roles y contexto del llamador
//!
//! El rol llega ya resuelto desde la capa de autenticación (externa a este
//! servicio); acá solo se usa para la compuerta de autorización de
//! transiciones.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Dispatcher,
    Supervisor,
    AccessControl,
    Driver,
}

impl UserRole {
    pub const ALL: [UserRole; 5] = [
        UserRole::Admin,
        UserRole::Dispatcher,
        UserRole::Supervisor,
        UserRole::AccessControl,
        UserRole::Driver,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Dispatcher => "dispatcher",
            UserRole::Supervisor => "supervisor",
            UserRole::AccessControl => "access_control",
            UserRole::Driver => "driver",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "dispatcher" => Some(UserRole::Dispatcher),
            "supervisor" => Some(UserRole::Supervisor),
            "access_control" => Some(UserRole::AccessControl),
            "driver" => Some(UserRole::Driver),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identidad del llamador autenticado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerContext {
    pub caller_id: Uuid,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::from_str(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_unknown_role() {
        assert_eq!(UserRole::from_str("livreur"), None);
    }
}
