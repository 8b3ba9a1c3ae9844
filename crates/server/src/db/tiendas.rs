//! Store repository for database operations.

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use mercadito_core::CategoriaGeneral;

use super::RepositoryError;
use crate::models::Tienda;

/// Input for creating a store together with its vendor account.
#[derive(Debug, Clone)]
pub struct NuevaTienda {
    pub nombre: String,
    pub slug: String,
    pub descripcion: Option<String>,
    pub categoria_general: CategoriaGeneral,
    pub whatsapp: String,
    pub direccion: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub plan_id: String,
    pub vendedor_nombre: String,
    pub vendedor_email: String,
    pub vendedor_password_hash: String,
}

/// Fields a vendor may edit on their own store. The slug and plan are
/// admin-controlled and deliberately absent.
#[derive(Debug, Clone)]
pub struct PerfilTienda {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub categoria_general: CategoriaGeneral,
    pub whatsapp: String,
    pub direccion: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
}

/// Admin listing row: a store joined with its plan name and vendor email.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TiendaResumen {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub tienda: Tienda,
    pub plan_nombre: String,
    pub vendedor_email: Option<String>,
}

/// Repository for store database operations.
pub struct TiendaRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TiendaRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all stores with plan and vendor details, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<TiendaResumen>, RepositoryError> {
        let tiendas = sqlx::query_as::<_, TiendaResumen>(
            r"
            SELECT t.*, p.nombre AS plan_nombre, v.email AS vendedor_email
            FROM tiendas t
            JOIN planes p ON p.id = t.plan_id
            LEFT JOIN vendedores v ON v.tienda_id = t.id
            ORDER BY t.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(tiendas)
    }

    /// Get a store by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &str) -> Result<Option<Tienda>, RepositoryError> {
        let tienda = sqlx::query_as::<_, Tienda>("SELECT * FROM tiendas WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(tienda)
    }

    /// Get an active store by its public slug.
    ///
    /// Deactivated stores are invisible here, so every public endpoint
    /// that resolves a slug goes dark the moment an admin flips `activa`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_activa_by_slug(&self, slug: &str) -> Result<Option<Tienda>, RepositoryError> {
        let tienda =
            sqlx::query_as::<_, Tienda>("SELECT * FROM tiendas WHERE slug = ? AND activa = 1")
                .bind(slug)
                .fetch_optional(self.pool)
                .await?;

        Ok(tienda)
    }

    /// Create a store and its vendor account in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug or vendor email is
    /// already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, nueva: &NuevaTienda) -> Result<Tienda, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let tienda_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO tiendas
                (id, nombre, slug, descripcion, categoria_general, whatsapp,
                 direccion, latitud, longitud, activa, plan_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)
            ",
        )
        .bind(&tienda_id)
        .bind(&nueva.nombre)
        .bind(&nueva.slug)
        .bind(&nueva.descripcion)
        .bind(nueva.categoria_general)
        .bind(&nueva.whatsapp)
        .bind(&nueva.direccion)
        .bind(nueva.latitud)
        .bind(nueva.longitud)
        .bind(&nueva.plan_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("el slug ya existe".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        sqlx::query(
            r"
            INSERT INTO vendedores
                (id, nombre, email, password_hash, must_change_password, tienda_id, created_at)
            VALUES (?, ?, ?, ?, 1, ?, ?)
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&nueva.vendedor_nombre)
        .bind(&nueva.vendedor_email)
        .bind(&nueva.vendedor_password_hash)
        .bind(&tienda_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("el email del vendedor ya existe".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        tx.commit().await?;

        Ok(Tienda {
            id: tienda_id,
            nombre: nueva.nombre.clone(),
            slug: nueva.slug.clone(),
            descripcion: nueva.descripcion.clone(),
            categoria_general: nueva.categoria_general,
            whatsapp: nueva.whatsapp.clone(),
            direccion: nueva.direccion.clone(),
            latitud: nueva.latitud,
            longitud: nueva.longitud,
            activa: true,
            plan_id: nueva.plan_id.clone(),
            created_at: now,
        })
    }

    /// Update a store's profile fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_perfil(
        &self,
        id: &str,
        perfil: &PerfilTienda,
    ) -> Result<Tienda, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE tiendas
            SET nombre = ?, descripcion = ?, categoria_general = ?, whatsapp = ?,
                direccion = ?, latitud = ?, longitud = ?
            WHERE id = ?
            ",
        )
        .bind(&perfil.nombre)
        .bind(&perfil.descripcion)
        .bind(perfil.categoria_general)
        .bind(&perfil.whatsapp)
        .bind(&perfil.direccion)
        .bind(perfil.latitud)
        .bind(perfil.longitud)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Admin-side update: profile fields plus plan and activation, in a
    /// single statement so the store is never left half-updated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_admin(
        &self,
        id: &str,
        perfil: &PerfilTienda,
        plan_id: &str,
        activa: bool,
    ) -> Result<Tienda, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE tiendas
            SET nombre = ?, descripcion = ?, categoria_general = ?, whatsapp = ?,
                direccion = ?, latitud = ?, longitud = ?, plan_id = ?, activa = ?
            WHERE id = ?
            ",
        )
        .bind(&perfil.nombre)
        .bind(&perfil.descripcion)
        .bind(perfil.categoria_general)
        .bind(&perfil.whatsapp)
        .bind(&perfil.direccion)
        .bind(perfil.latitud)
        .bind(perfil.longitud)
        .bind(plan_id)
        .bind(activa)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a store. Cascades to its vendor, catalog, files and orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM tiendas WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
