//! Account models: platform admins, store vendors, reset tokens.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A platform administrator.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Admin {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub nombre: String,
    pub created_at: DateTime<Utc>,
}

/// A vendor account. Exactly one per store.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Vendedor {
    pub id: String,
    pub nombre: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub must_change_password: bool,
    pub tienda_id: String,
    pub created_at: DateTime<Utc>,
}

/// A single-use password reset token. `tipo` records which principal kind
/// requested it so a vendor token cannot reset an admin password.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PasswordResetToken {
    pub id: String,
    pub email: String,
    pub token: String,
    pub tipo: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
