//! Password reset token repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use mercadito_core::Principal;

use super::RepositoryError;
use crate::models::PasswordResetToken;

/// Repository for single-use password reset tokens.
pub struct ResetTokenRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ResetTokenRepository<'a> {
    /// Create a new reset token repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a fresh token, discarding any older tokens for the same
    /// account so only the latest link works.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        email: &str,
        token: &str,
        tipo: Principal,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM password_reset_tokens WHERE email = ? AND tipo = ?")
            .bind(email)
            .bind(tipo.to_string())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r"
            INSERT INTO password_reset_tokens (id, email, token, tipo, expires_at, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(email)
        .bind(token)
        .bind(tipo.to_string())
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Look up a token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, token: &str) -> Result<Option<PasswordResetToken>, RepositoryError> {
        let row = sqlx::query_as::<_, PasswordResetToken>(
            "SELECT * FROM password_reset_tokens WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Consume a token so it can't be used twice.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn consume(&self, token: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM password_reset_tokens WHERE token = ?")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
