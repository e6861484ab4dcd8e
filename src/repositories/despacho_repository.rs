//! Repositorio de despachos
//!
//! Lectura y alta de despachos. El estado derivado del despacho NUNCA se
//! escribe desde acá: solo lo escribe el commit transaccional del
//! repositorio de viajes, como proyección de los estados de sus viajes.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::despacho::Despacho;
use crate::utils::errors::AppError;

pub struct DespachoRepository {
    pool: PgPool,
}

impl DespachoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        reference: String,
        origin: String,
        destination: String,
        scheduled_start: chrono::DateTime<chrono::Utc>,
        scheduled_end: chrono::DateTime<chrono::Utc>,
    ) -> Result<Despacho, AppError> {
        let despacho = sqlx::query_as::<_, Despacho>(
            r#"
            INSERT INTO despachos (id, reference, origin, destination, scheduled_start, scheduled_end, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending', NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reference)
        .bind(origin)
        .bind(destination)
        .bind(scheduled_start)
        .bind(scheduled_end)
        .fetch_one(&self.pool)
        .await?;

        Ok(despacho)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Despacho>, AppError> {
        let despacho = sqlx::query_as::<_, Despacho>("SELECT * FROM despachos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(despacho)
    }

    pub async fn reference_exists(&self, reference: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM despachos WHERE reference = $1)")
                .bind(reference)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }
}
