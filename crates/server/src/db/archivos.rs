//! File repository: image and video blobs stored in the database.
//!
//! Metadata and blob access are split. Listings read [`Archivo`] rows
//! without the `data` column; only the content endpoint fetches
//! [`ArchivoDatos`].

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use mercadito_core::TipoArchivo;

use super::RepositoryError;
use crate::models::{Archivo, ArchivoDatos};

const COLUMNAS_META: &str = "id, tipo, nombre_original, mime_type, tamano, orden, \
     tienda_id, producto_id, es_logo, es_banner, created_at";

/// Input for storing an uploaded file.
#[derive(Debug)]
pub struct NuevoArchivo {
    pub tipo: TipoArchivo,
    pub nombre_original: String,
    pub mime_type: String,
    pub data: Vec<u8>,
    pub producto_id: Option<String>,
    pub es_logo: bool,
    pub es_banner: bool,
}

/// Repository for stored files.
pub struct ArchivoRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ArchivoRepository<'a> {
    /// Create a new file repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch a file's bytes by ID. Public, not tenant-scoped: file IDs
    /// are unguessable and the content endpoint serves any store's media.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_datos(&self, id: &str) -> Result<Option<ArchivoDatos>, RepositoryError> {
        let datos = sqlx::query_as::<_, ArchivoDatos>(
            "SELECT id, nombre_original, mime_type, tamano, data FROM archivos WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(datos)
    }

    /// List a product's files in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_producto(
        &self,
        tienda_id: &str,
        producto_id: &str,
    ) -> Result<Vec<Archivo>, RepositoryError> {
        let archivos = sqlx::query_as::<_, Archivo>(&format!(
            "SELECT {COLUMNAS_META} FROM archivos \
             WHERE tienda_id = ? AND producto_id = ? ORDER BY orden ASC"
        ))
        .bind(tienda_id)
        .bind(producto_id)
        .fetch_all(self.pool)
        .await?;

        Ok(archivos)
    }

    /// List a store's branding files (logo and banner).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_branding(&self, tienda_id: &str) -> Result<Vec<Archivo>, RepositoryError> {
        let archivos = sqlx::query_as::<_, Archivo>(&format!(
            "SELECT {COLUMNAS_META} FROM archivos \
             WHERE tienda_id = ? AND (es_logo = 1 OR es_banner = 1)"
        ))
        .bind(tienda_id)
        .fetch_all(self.pool)
        .await?;

        Ok(archivos)
    }

    /// Count a product's stored images, for plan quota checks. Videos
    /// don't count against the image quota.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_imagenes(
        &self,
        tienda_id: &str,
        producto_id: &str,
    ) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as(
            r"
            SELECT COUNT(*) FROM archivos
            WHERE tienda_id = ? AND producto_id = ? AND tipo = 'imagen'
            ",
        )
        .bind(tienda_id)
        .bind(producto_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Store an uploaded file.
    ///
    /// When the file is marked as logo or banner, the previous holder of
    /// that flag is deleted in the same transaction, so each store keeps
    /// at most one of each.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        tienda_id: &str,
        nuevo: NuevoArchivo,
    ) -> Result<Archivo, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if nuevo.es_logo {
            sqlx::query("DELETE FROM archivos WHERE tienda_id = ? AND es_logo = 1")
                .bind(tienda_id)
                .execute(&mut *tx)
                .await?;
        }
        if nuevo.es_banner {
            sqlx::query("DELETE FROM archivos WHERE tienda_id = ? AND es_banner = 1")
                .bind(tienda_id)
                .execute(&mut *tx)
                .await?;
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let tamano = i64::try_from(nuevo.data.len()).map_err(|_| {
            RepositoryError::DataCorruption("file size exceeds i64".to_owned())
        })?;

        sqlx::query(
            r"
            INSERT INTO archivos
                (id, tipo, nombre_original, mime_type, tamano, data, orden,
                 tienda_id, producto_id, es_logo, es_banner, created_at)
            VALUES (?, ?, ?, ?, ?, ?,
                    (SELECT COALESCE(MAX(orden), 0) + 1 FROM archivos
                     WHERE tienda_id = ? AND producto_id IS ?),
                    ?, ?, ?, ?, ?)
            ",
        )
        .bind(&id)
        .bind(nuevo.tipo)
        .bind(&nuevo.nombre_original)
        .bind(&nuevo.mime_type)
        .bind(tamano)
        .bind(&nuevo.data)
        .bind(tienda_id)
        .bind(&nuevo.producto_id)
        .bind(tienda_id)
        .bind(&nuevo.producto_id)
        .bind(nuevo.es_logo)
        .bind(nuevo.es_banner)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let archivo = sqlx::query_as::<_, Archivo>(&format!(
            "SELECT {COLUMNAS_META} FROM archivos WHERE id = ?"
        ))
        .bind(&id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(archivo)
    }

    /// Delete a file belonging to a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the file isn't in this store.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, tienda_id: &str, id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM archivos WHERE id = ? AND tienda_id = ?")
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
