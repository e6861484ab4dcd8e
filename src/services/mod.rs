//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! El servicio de transiciones es el único con autoridad de escritura sobre
//! el estado de un viaje; el resto de los componentes solo lee.

pub mod memory_store;
pub mod notification_service;
pub mod store;
pub mod viaje_state_service;

pub use notification_service::NotificationService;
pub use store::{Notifier, TransitionCommit, ViajeStore};
pub use viaje_state_service::{TransitionOutcome, ViajeStateService};
