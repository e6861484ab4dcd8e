//! Controller de despachos
//!
//! Alta del despacho con sus viajes (todos en `pending`) y lectura del
//! despacho con el estado derivado y sus viajes.

use uuid::Uuid;
use validator::Validate;

use crate::dto::despacho_dto::{ApiResponse, CreateDespachoRequest, DespachoResponse};
use crate::dto::viaje_dto::ViajeResponse;
use crate::lifecycle::LifecycleRegistry;
use crate::repositories::{DespachoRepository, ViajeRepository};
use crate::utils::errors::AppError;

pub struct DespachoController {
    repository: DespachoRepository,
    viaje_repository: ViajeRepository,
    registry: LifecycleRegistry,
}

impl DespachoController {
    pub fn new(
        repository: DespachoRepository,
        viaje_repository: ViajeRepository,
        registry: LifecycleRegistry,
    ) -> Self {
        Self {
            repository,
            viaje_repository,
            registry,
        }
    }

    pub async fn create(
        &self,
        request: CreateDespachoRequest,
    ) -> Result<ApiResponse<DespachoResponse>, AppError> {
        request.validate()?;

        if request.scheduled_end <= request.scheduled_start {
            return Err(AppError::BadRequest(
                "La ventana programada termina antes de empezar".to_string(),
            ));
        }

        if self.repository.reference_exists(&request.reference).await? {
            return Err(AppError::BadRequest(format!(
                "La referencia '{}' ya está registrada",
                request.reference
            )));
        }

        let despacho = self
            .repository
            .create(
                request.reference,
                request.origin,
                request.destination,
                request.scheduled_start,
                request.scheduled_end,
            )
            .await?;

        let viaje_count = request.viaje_count.unwrap_or(1);
        let mut viajes = Vec::with_capacity(viaje_count as usize);
        for sequence in 1..=viaje_count {
            let viaje = self
                .viaje_repository
                .create(
                    despacho.id,
                    sequence,
                    despacho.scheduled_start,
                    despacho.scheduled_end,
                )
                .await?;
            viajes.push(ViajeResponse::from_viaje(viaje, &self.registry));
        }

        Ok(ApiResponse::success_with_message(
            DespachoResponse::from_despacho(despacho, viajes),
            "Despacho creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<DespachoResponse, AppError> {
        let despacho = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Despacho '{}' no encontrado", id)))?;

        let viajes = self
            .viaje_repository
            .find_by_despacho(id)
            .await?
            .into_iter()
            .map(|v| ViajeResponse::from_viaje(v, &self.registry))
            .collect();

        Ok(DespachoResponse::from_despacho(despacho, viajes))
    }
}
