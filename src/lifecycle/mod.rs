//! Ciclo de vida del viaje
//!
//! Este módulo es el núcleo del sistema: el registro canónico de estados,
//! la tabla de transiciones, el mapa de autorización por rol, el validador
//! y los cálculos derivados de progreso y estado operacional. Toda la
//! lógica de transiciones vive acá; ningún otro módulo compara estados a mano.

pub mod operational;
pub mod progress;
pub mod registry;
pub mod roles;
pub mod states;
pub mod transitions;
pub mod validator;

pub use operational::{OperationalConfig, OperationalStatus};
pub use registry::LifecycleRegistry;
pub use states::{ViajePhase, ViajeStatus};
pub use validator::TransitionValidator;
