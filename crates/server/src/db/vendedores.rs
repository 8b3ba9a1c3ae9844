//! Vendor repository for database operations.

use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::Vendedor;

/// Repository for vendor accounts. Vendors are created together with
/// their store; see [`super::TiendaRepository::create`].
pub struct VendedorRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> VendedorRepository<'a> {
    /// Create a new vendor repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a vendor by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Vendedor>, RepositoryError> {
        let vendedor = sqlx::query_as::<_, Vendedor>("SELECT * FROM vendedores WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(vendedor)
    }

    /// Get a vendor by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &str) -> Result<Option<Vendedor>, RepositoryError> {
        let vendedor = sqlx::query_as::<_, Vendedor>("SELECT * FROM vendedores WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(vendedor)
    }

    /// Get the vendor that owns a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_tienda(
        &self,
        tienda_id: &str,
    ) -> Result<Option<Vendedor>, RepositoryError> {
        let vendedor =
            sqlx::query_as::<_, Vendedor>("SELECT * FROM vendedores WHERE tienda_id = ?")
                .bind(tienda_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(vendedor)
    }

    /// Replace a vendor's password hash and clear the forced-change flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the vendor doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_password(
        &self,
        id: &str,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE vendedores SET password_hash = ?, must_change_password = 0 WHERE id = ?",
        )
        .bind(password_hash)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
