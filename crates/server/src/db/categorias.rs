//! Product category repository. All operations are tenant-scoped.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::RepositoryError;
use crate::models::CategoriaProducto;

/// Repository for per-store product categories.
pub struct CategoriaRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoriaRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List a store's categories in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, tienda_id: &str) -> Result<Vec<CategoriaProducto>, RepositoryError> {
        let categorias = sqlx::query_as::<_, CategoriaProducto>(
            "SELECT * FROM categorias_producto WHERE tienda_id = ? ORDER BY orden ASC",
        )
        .bind(tienda_id)
        .fetch_all(self.pool)
        .await?;

        Ok(categorias)
    }

    /// List a store's active categories in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_activas(
        &self,
        tienda_id: &str,
    ) -> Result<Vec<CategoriaProducto>, RepositoryError> {
        let categorias = sqlx::query_as::<_, CategoriaProducto>(
            r"
            SELECT * FROM categorias_producto
            WHERE tienda_id = ? AND activa = 1
            ORDER BY orden ASC
            ",
        )
        .bind(tienda_id)
        .fetch_all(self.pool)
        .await?;

        Ok(categorias)
    }

    /// Create a category at the end of the store's display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        tienda_id: &str,
        nombre: &str,
    ) -> Result<CategoriaProducto, RepositoryError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO categorias_producto (id, nombre, activa, orden, tienda_id, created_at)
            VALUES (?, ?, 1,
                    (SELECT COALESCE(MAX(orden), 0) + 1 FROM categorias_producto
                     WHERE tienda_id = ?),
                    ?, ?)
            ",
        )
        .bind(&id)
        .bind(nombre)
        .bind(tienda_id)
        .bind(tienda_id)
        .bind(now)
        .execute(self.pool)
        .await?;

        let categoria = sqlx::query_as::<_, CategoriaProducto>(
            "SELECT * FROM categorias_producto WHERE id = ?",
        )
        .bind(&id)
        .fetch_one(self.pool)
        .await?;

        Ok(categoria)
    }

    /// Rename a category or toggle its visibility.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category isn't in this store.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        tienda_id: &str,
        id: &str,
        nombre: &str,
        activa: bool,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE categorias_producto SET nombre = ?, activa = ? WHERE id = ? AND tienda_id = ?",
        )
        .bind(nombre)
        .bind(activa)
        .bind(id)
        .bind(tienda_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a category. Products keep existing with `categoria_id` nulled
    /// by the foreign key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category isn't in this store.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, tienda_id: &str, id: &str) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("DELETE FROM categorias_producto WHERE id = ? AND tienda_id = ?")
                .bind(id)
                .bind(tienda_id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
