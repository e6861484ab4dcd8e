//! Repositorio de viajes
//!
//! Implementación PostgreSQL del puerto `ViajeStore`. El commit de una
//! transición corre en una única transacción: CAS sobre el estado del
//! viaje, proyección del despacho y registro de auditoría se confirman
//! juntos. El perdedor del CAS recibe `ConcurrentModification`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::lifecycle::ViajeStatus;
use crate::models::despacho::DespachoStatus;
use crate::models::transition::ViajeTransition;
use crate::models::viaje::Viaje;
use crate::services::store::{TransitionCommit, ViajeStore};
use crate::utils::errors::{concurrent_modification_error, AppError};

pub struct ViajeRepository {
    pool: PgPool,
}

impl ViajeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        despacho_id: Uuid,
        sequence_number: i32,
        scheduled_start: chrono::DateTime<chrono::Utc>,
        scheduled_end: chrono::DateTime<chrono::Utc>,
    ) -> Result<Viaje, AppError> {
        let viaje = sqlx::query_as::<_, Viaje>(
            r#"
            INSERT INTO viajes (id, despacho_id, status, sequence_number, scheduled_start, scheduled_end, created_at, updated_at)
            VALUES ($1, $2, 'pending', $3, $4, $5, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(despacho_id)
        .bind(sequence_number)
        .bind(scheduled_start)
        .bind(scheduled_end)
        .fetch_one(&self.pool)
        .await?;

        Ok(viaje)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Viaje>, AppError> {
        let viaje = sqlx::query_as::<_, Viaje>("SELECT * FROM viajes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(viaje)
    }

    pub async fn find_by_despacho(&self, despacho_id: Uuid) -> Result<Vec<Viaje>, AppError> {
        let viajes = sqlx::query_as::<_, Viaje>(
            "SELECT * FROM viajes WHERE despacho_id = $1 ORDER BY sequence_number",
        )
        .bind(despacho_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(viajes)
    }
}

#[async_trait]
impl ViajeStore for ViajeRepository {
    async fn load_viaje(&self, id: Uuid) -> Result<Option<Viaje>, AppError> {
        self.find_by_id(id).await
    }

    async fn commit_transition(
        &self,
        commit: TransitionCommit,
    ) -> Result<DespachoStatus, AppError> {
        let mut tx = self.pool.begin().await?;

        // Serializa los commits del mismo despacho: dos transiciones
        // concurrentes sobre viajes distintos escriben ambas la proyección,
        // y sin este lock la segunda podría calcularla sobre una foto vieja
        sqlx::query("SELECT id FROM despachos WHERE id = $1 FOR UPDATE")
            .bind(commit.despacho_id)
            .execute(&mut *tx)
            .await?;

        // CAS: la escritura solo gana si el estado leído sigue vigente
        let updated = sqlx::query(
            r#"
            UPDATE viajes
            SET status = $2, cancelled_from = COALESCE($3, cancelled_from), updated_at = NOW()
            WHERE id = $1 AND status = $4
            "#,
        )
        .bind(commit.viaje_id)
        .bind(commit.new_status)
        .bind(commit.cancelled_from)
        .bind(commit.expected_status)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            let current: Option<(ViajeStatus,)> =
                sqlx::query_as("SELECT status FROM viajes WHERE id = $1")
                    .bind(commit.viaje_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            return Err(match current {
                None => AppError::NotFound(format!("Viaje '{}' no encontrado", commit.viaje_id)),
                Some(_) => {
                    concurrent_modification_error("Viaje", &commit.viaje_id.to_string())
                }
            });
        }

        // Proyección sobre los estados vigentes dentro de la transacción
        let statuses: Vec<(ViajeStatus,)> =
            sqlx::query_as("SELECT status FROM viajes WHERE despacho_id = $1")
                .bind(commit.despacho_id)
                .fetch_all(&mut *tx)
                .await?;
        let statuses: Vec<ViajeStatus> = statuses.into_iter().map(|(s,)| s).collect();
        let despacho_status = DespachoStatus::from_viajes(&statuses);

        sqlx::query("UPDATE despachos SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(commit.despacho_id)
            .bind(despacho_status)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO viaje_transitions (id, viaje_id, from_status, to_status, actor_id, actor_role, note, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(commit.audit.viaje_id)
        .bind(commit.audit.from_status)
        .bind(commit.audit.to_status)
        .bind(commit.audit.actor_id)
        .bind(commit.audit.actor_role.as_str())
        .bind(commit.audit.note)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(despacho_status)
    }

    async fn list_transitions(&self, viaje_id: Uuid) -> Result<Vec<ViajeTransition>, AppError> {
        let transitions = sqlx::query_as::<_, ViajeTransition>(
            "SELECT * FROM viaje_transitions WHERE viaje_id = $1 ORDER BY position",
        )
        .bind(viaje_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transitions)
    }
}
