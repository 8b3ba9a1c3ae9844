//! Product repository. All operations are tenant-scoped.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use mercadito_core::Precio;

use super::RepositoryError;
use crate::models::Producto;

/// Input for creating or updating a product.
#[derive(Debug, Clone)]
pub struct NuevoProducto {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Precio,
    pub precio_oferta: Option<Precio>,
    pub stock: i64,
    pub activo: bool,
    pub destacado: bool,
    pub categoria_id: Option<String>,
}

/// Repository for product database operations.
pub struct ProductoRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductoRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every product in a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, tienda_id: &str) -> Result<Vec<Producto>, RepositoryError> {
        let productos = sqlx::query_as::<_, Producto>(
            "SELECT * FROM productos WHERE tienda_id = ? ORDER BY created_at DESC",
        )
        .bind(tienda_id)
        .fetch_all(self.pool)
        .await?;

        Ok(productos)
    }

    /// List a store's active products, for the public storefront.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_activos(&self, tienda_id: &str) -> Result<Vec<Producto>, RepositoryError> {
        let productos = sqlx::query_as::<_, Producto>(
            r"
            SELECT * FROM productos
            WHERE tienda_id = ? AND activo = 1
            ORDER BY destacado DESC, created_at DESC
            ",
        )
        .bind(tienda_id)
        .fetch_all(self.pool)
        .await?;

        Ok(productos)
    }

    /// Get a product within a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        tienda_id: &str,
        id: &str,
    ) -> Result<Option<Producto>, RepositoryError> {
        let producto =
            sqlx::query_as::<_, Producto>("SELECT * FROM productos WHERE id = ? AND tienda_id = ?")
                .bind(id)
                .bind(tienda_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(producto)
    }

    /// Count a store's products, for plan quota checks.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, tienda_id: &str) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM productos WHERE tienda_id = ?")
                .bind(tienda_id)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        tienda_id: &str,
        nuevo: &NuevoProducto,
    ) -> Result<Producto, RepositoryError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO productos
                (id, nombre, descripcion, precio, precio_oferta, stock, activo,
                 destacado, categoria_id, tienda_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&id)
        .bind(&nuevo.nombre)
        .bind(&nuevo.descripcion)
        .bind(nuevo.precio)
        .bind(nuevo.precio_oferta)
        .bind(nuevo.stock)
        .bind(nuevo.activo)
        .bind(nuevo.destacado)
        .bind(&nuevo.categoria_id)
        .bind(tienda_id)
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(Producto {
            id,
            nombre: nuevo.nombre.clone(),
            descripcion: nuevo.descripcion.clone(),
            precio: nuevo.precio,
            precio_oferta: nuevo.precio_oferta,
            stock: nuevo.stock,
            activo: nuevo.activo,
            destacado: nuevo.destacado,
            categoria_id: nuevo.categoria_id.clone(),
            tienda_id: tienda_id.to_owned(),
            created_at: now,
        })
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product isn't in this store.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        tienda_id: &str,
        id: &str,
        cambios: &NuevoProducto,
    ) -> Result<Producto, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE productos
            SET nombre = ?, descripcion = ?, precio = ?, precio_oferta = ?,
                stock = ?, activo = ?, destacado = ?, categoria_id = ?
            WHERE id = ? AND tienda_id = ?
            ",
        )
        .bind(&cambios.nombre)
        .bind(&cambios.descripcion)
        .bind(cambios.precio)
        .bind(cambios.precio_oferta)
        .bind(cambios.stock)
        .bind(cambios.activo)
        .bind(cambios.destacado)
        .bind(&cambios.categoria_id)
        .bind(id)
        .bind(tienda_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(tienda_id, id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a product. Its files cascade; order lines keep their
    /// snapshots with `producto_id` nulled.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product isn't in this store.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, tienda_id: &str, id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM productos WHERE id = ? AND tienda_id = ?")
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
