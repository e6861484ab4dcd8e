//! Estados del viaje
//!
//! Este módulo define el enum canónico de estados del viaje, su agrupación
//! en fases operativas y los metadatos de presentación (etiqueta y color).
//! Mapea exactamente al ENUM PostgreSQL `viaje_status`.

use serde::{Deserialize, Serialize};
use sqlx::Type;
use std::fmt;
use std::str::FromStr;

/// Estado operativo del viaje - mapea al ENUM viaje_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "viaje_status", rename_all = "snake_case")]
pub enum ViajeStatus {
    Pending,
    CarrierAssigned,
    TruckAssigned,
    DriverConfirmed,
    InTransitToOrigin,
    ArrivedOrigin,
    LoadingCalled,
    Loading,
    Loaded,
    DepartedOrigin,
    InTransitToDestination,
    ArrivedDestination,
    UnloadingCalled,
    Unloading,
    Unloaded,
    DepartedDestination,
    Completed,
    Cancelled,
}

/// Fase operativa a la que pertenece cada estado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViajePhase {
    Creation,
    Assignment,
    TransitToOrigin,
    OriginYard,
    EgressOrigin,
    TransitToDestination,
    DestinationYard,
    Closure,
    Cancelled,
}

impl ViajeStatus {
    /// Todos los estados, en el orden canónico de la cadena de avance.
    /// `Cancelled` va al final porque no forma parte del flujo lineal.
    pub const ALL: [ViajeStatus; 18] = [
        ViajeStatus::Pending,
        ViajeStatus::CarrierAssigned,
        ViajeStatus::TruckAssigned,
        ViajeStatus::DriverConfirmed,
        ViajeStatus::InTransitToOrigin,
        ViajeStatus::ArrivedOrigin,
        ViajeStatus::LoadingCalled,
        ViajeStatus::Loading,
        ViajeStatus::Loaded,
        ViajeStatus::DepartedOrigin,
        ViajeStatus::InTransitToDestination,
        ViajeStatus::ArrivedDestination,
        ViajeStatus::UnloadingCalled,
        ViajeStatus::Unloading,
        ViajeStatus::Unloaded,
        ViajeStatus::DepartedDestination,
        ViajeStatus::Completed,
        ViajeStatus::Cancelled,
    ];

    /// Estado terminal: sin transiciones salientes
    pub fn is_terminal(&self) -> bool {
        matches!(self, ViajeStatus::Completed | ViajeStatus::Cancelled)
    }

    /// Fase operativa del estado
    pub fn phase(&self) -> ViajePhase {
        match self {
            ViajeStatus::Pending => ViajePhase::Creation,
            ViajeStatus::CarrierAssigned
            | ViajeStatus::TruckAssigned
            | ViajeStatus::DriverConfirmed => ViajePhase::Assignment,
            ViajeStatus::InTransitToOrigin => ViajePhase::TransitToOrigin,
            ViajeStatus::ArrivedOrigin
            | ViajeStatus::LoadingCalled
            | ViajeStatus::Loading
            | ViajeStatus::Loaded => ViajePhase::OriginYard,
            ViajeStatus::DepartedOrigin => ViajePhase::EgressOrigin,
            ViajeStatus::InTransitToDestination => ViajePhase::TransitToDestination,
            ViajeStatus::ArrivedDestination
            | ViajeStatus::UnloadingCalled
            | ViajeStatus::Unloading
            | ViajeStatus::Unloaded
            | ViajeStatus::DepartedDestination => ViajePhase::DestinationYard,
            ViajeStatus::Completed => ViajePhase::Closure,
            ViajeStatus::Cancelled => ViajePhase::Cancelled,
        }
    }

    /// Etiqueta de presentación para la UI
    pub fn label(&self) -> &'static str {
        match self {
            ViajeStatus::Pending => "Pendiente",
            ViajeStatus::CarrierAssigned => "Transportista asignado",
            ViajeStatus::TruckAssigned => "Camión asignado",
            ViajeStatus::DriverConfirmed => "Chofer confirmado",
            ViajeStatus::InTransitToOrigin => "En tránsito a origen",
            ViajeStatus::ArrivedOrigin => "Arribó a origen",
            ViajeStatus::LoadingCalled => "Llamado a carga",
            ViajeStatus::Loading => "Cargando",
            ViajeStatus::Loaded => "Cargado",
            ViajeStatus::DepartedOrigin => "Salió de origen",
            ViajeStatus::InTransitToDestination => "En tránsito a destino",
            ViajeStatus::ArrivedDestination => "Arribó a destino",
            ViajeStatus::UnloadingCalled => "Llamado a descarga",
            ViajeStatus::Unloading => "Descargando",
            ViajeStatus::Unloaded => "Descargado",
            ViajeStatus::DepartedDestination => "Salió de destino",
            ViajeStatus::Completed => "Completado",
            ViajeStatus::Cancelled => "Cancelado",
        }
    }

    /// Token de color para la UI
    pub fn color(&self) -> &'static str {
        match self.phase() {
            ViajePhase::Creation => "gray",
            ViajePhase::Assignment => "blue",
            ViajePhase::TransitToOrigin | ViajePhase::TransitToDestination => "indigo",
            ViajePhase::OriginYard | ViajePhase::DestinationYard => "amber",
            ViajePhase::EgressOrigin => "cyan",
            ViajePhase::Closure => "green",
            ViajePhase::Cancelled => "red",
        }
    }
}

impl fmt::Display for ViajeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViajeStatus::Pending => "pending",
            ViajeStatus::CarrierAssigned => "carrier_assigned",
            ViajeStatus::TruckAssigned => "truck_assigned",
            ViajeStatus::DriverConfirmed => "driver_confirmed",
            ViajeStatus::InTransitToOrigin => "in_transit_to_origin",
            ViajeStatus::ArrivedOrigin => "arrived_origin",
            ViajeStatus::LoadingCalled => "loading_called",
            ViajeStatus::Loading => "loading",
            ViajeStatus::Loaded => "loaded",
            ViajeStatus::DepartedOrigin => "departed_origin",
            ViajeStatus::InTransitToDestination => "in_transit_to_destination",
            ViajeStatus::ArrivedDestination => "arrived_destination",
            ViajeStatus::UnloadingCalled => "unloading_called",
            ViajeStatus::Unloading => "unloading",
            ViajeStatus::Unloaded => "unloaded",
            ViajeStatus::DepartedDestination => "departed_destination",
            ViajeStatus::Completed => "completed",
            ViajeStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ViajeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ViajeStatus::Pending),
            "carrier_assigned" => Ok(ViajeStatus::CarrierAssigned),
            "truck_assigned" => Ok(ViajeStatus::TruckAssigned),
            "driver_confirmed" => Ok(ViajeStatus::DriverConfirmed),
            "in_transit_to_origin" => Ok(ViajeStatus::InTransitToOrigin),
            "arrived_origin" => Ok(ViajeStatus::ArrivedOrigin),
            "loading_called" => Ok(ViajeStatus::LoadingCalled),
            "loading" => Ok(ViajeStatus::Loading),
            "loaded" => Ok(ViajeStatus::Loaded),
            "departed_origin" => Ok(ViajeStatus::DepartedOrigin),
            "in_transit_to_destination" => Ok(ViajeStatus::InTransitToDestination),
            "arrived_destination" => Ok(ViajeStatus::ArrivedDestination),
            "unloading_called" => Ok(ViajeStatus::UnloadingCalled),
            "unloading" => Ok(ViajeStatus::Unloading),
            "unloaded" => Ok(ViajeStatus::Unloaded),
            "departed_destination" => Ok(ViajeStatus::DepartedDestination),
            "completed" => Ok(ViajeStatus::Completed),
            "cancelled" => Ok(ViajeStatus::Cancelled),
            _ => Err(format!("Estado de viaje inválido: {s}")),
        }
    }
}

impl Default for ViajeStatus {
    fn default() -> Self {
        ViajeStatus::Pending
    }
}
