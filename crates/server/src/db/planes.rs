//! Plan repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use mercadito_core::Precio;

use super::RepositoryError;
use crate::models::Plan;

/// Input for creating or updating a plan.
#[derive(Debug, Clone)]
pub struct NuevoPlan {
    pub nombre: String,
    pub precio_mensual: Precio,
    pub permite_videos: bool,
    pub max_productos: i64,
    pub max_imagenes_por_producto: i64,
    pub activo: bool,
}

/// Repository for plan database operations.
pub struct PlanRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PlanRepository<'a> {
    /// Create a new plan repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all plans, active and inactive, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Plan>, RepositoryError> {
        let planes = sqlx::query_as::<_, Plan>(
            "SELECT * FROM planes ORDER BY created_at ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(planes)
    }

    /// Get a plan by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &str) -> Result<Option<Plan>, RepositoryError> {
        let plan = sqlx::query_as::<_, Plan>("SELECT * FROM planes WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(plan)
    }

    /// Create a new plan.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, nuevo: &NuevoPlan) -> Result<Plan, RepositoryError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO planes
                (id, nombre, precio_mensual, permite_videos, max_productos,
                 max_imagenes_por_producto, activo, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&id)
        .bind(&nuevo.nombre)
        .bind(nuevo.precio_mensual)
        .bind(nuevo.permite_videos)
        .bind(nuevo.max_productos)
        .bind(nuevo.max_imagenes_por_producto)
        .bind(nuevo.activo)
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(Plan {
            id,
            nombre: nuevo.nombre.clone(),
            precio_mensual: nuevo.precio_mensual,
            permite_videos: nuevo.permite_videos,
            max_productos: nuevo.max_productos,
            max_imagenes_por_producto: nuevo.max_imagenes_por_producto,
            activo: nuevo.activo,
            created_at: now,
        })
    }

    /// Update an existing plan.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the plan doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: &str, cambios: &NuevoPlan) -> Result<Plan, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE planes
            SET nombre = ?, precio_mensual = ?, permite_videos = ?,
                max_productos = ?, max_imagenes_por_producto = ?, activo = ?
            WHERE id = ?
            ",
        )
        .bind(&cambios.nombre)
        .bind(cambios.precio_mensual)
        .bind(cambios.permite_videos)
        .bind(cambios.max_productos)
        .bind(cambios.max_imagenes_por_producto)
        .bind(cambios.activo)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a plan. Rejected while any store still references it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a store references the plan.
    /// Returns `RepositoryError::NotFound` if the plan doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let (tiendas,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tiendas WHERE plan_id = ?")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        if tiendas > 0 {
            return Err(RepositoryError::Conflict(
                "el plan tiene tiendas asignadas".to_owned(),
            ));
        }

        let result = sqlx::query("DELETE FROM planes WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
