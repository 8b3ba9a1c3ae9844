//! Authentication service: password hashing, login, resets.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use secrecy::ExposeSecret;
use thiserror::Error;

use mercadito_core::Principal;

use crate::db::{
    AdminRepository, RepositoryError, ResetTokenRepository, VendedorRepository,
};
use crate::models::{Admin, Vendedor};
use crate::session::create_token;
use crate::state::AppState;

const MIN_PASSWORD_LENGTH: usize = 8;
const RESET_TOKEN_LENGTH: usize = 48;
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    WeakPassword(String),

    #[error("Invalid or expired reset token")]
    InvalidToken,

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Hash a password with Argon2id and a random salt.
///
/// # Errors
///
/// Returns `AuthError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Reject passwords below the minimum length.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` with a client-facing message.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "La contraseña debe tener al menos {MIN_PASSWORD_LENGTH} caracteres"
        )));
    }
    Ok(())
}

/// Authenticate an admin and sign a session token.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` for an unknown email or wrong
/// password; the caller can't tell which.
pub async fn login_admin(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<(Admin, String), AuthError> {
    let email = email.trim().to_lowercase();
    let admin = AdminRepository::new(state.pool())
        .get_by_email(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(password, &admin.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    let token = create_token(
        state.session_keys(),
        &admin.id,
        &admin.email,
        Principal::Admin,
        None,
    )?;

    Ok((admin, token))
}

/// Authenticate a vendor and sign a session token bound to their store.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` for an unknown email or wrong
/// password.
pub async fn login_vendedor(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<(Vendedor, String), AuthError> {
    let email = email.trim().to_lowercase();
    let vendedor = VendedorRepository::new(state.pool())
        .get_by_email(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(password, &vendedor.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    let token = create_token(
        state.session_keys(),
        &vendedor.id,
        &vendedor.email,
        Principal::Vendedor,
        Some(vendedor.tienda_id.clone()),
    )?;

    Ok((vendedor, token))
}

/// Create the bootstrap admin account if it doesn't exist yet.
///
/// Runs once at startup and is idempotent; a second instance racing on
/// the same database just hits the unique email constraint and moves on.
///
/// # Errors
///
/// Returns an error if hashing or the insert fails.
pub async fn ensure_bootstrap_admin(state: &AppState) -> Result<(), AuthError> {
    let config = state.config();
    let repo = AdminRepository::new(state.pool());

    if repo.get_by_email(&config.admin_email).await?.is_some() {
        return Ok(());
    }

    let hash = hash_password(config.admin_password.expose_secret())?;
    match repo
        .create(&config.admin_email, &hash, "Administrador")
        .await
    {
        Ok(_) => {
            tracing::info!(email = %config.admin_email, "Cuenta de administrador creada");
            Ok(())
        }
        Err(RepositoryError::Conflict(_)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Change a logged-in account's password after verifying the current one.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the current password is
/// wrong and `AuthError::WeakPassword` if the new one is too short.
pub async fn change_password(
    state: &AppState,
    tipo: Principal,
    account_id: &str,
    actual: &str,
    nueva: &str,
) -> Result<(), AuthError> {
    validate_password(nueva)?;

    let pool = state.pool();
    match tipo {
        Principal::Admin => {
            let repo = AdminRepository::new(pool);
            let admin = repo
                .get(account_id)
                .await?
                .ok_or(AuthError::InvalidCredentials)?;
            if !verify_password(actual, &admin.password_hash) {
                return Err(AuthError::InvalidCredentials);
            }
            repo.update_password(account_id, &hash_password(nueva)?)
                .await?;
        }
        Principal::Vendedor => {
            let repo = VendedorRepository::new(pool);
            let vendedor = repo
                .get(account_id)
                .await?
                .ok_or(AuthError::InvalidCredentials)?;
            if !verify_password(actual, &vendedor.password_hash) {
                return Err(AuthError::InvalidCredentials);
            }
            repo.update_password(account_id, &hash_password(nueva)?)
                .await?;
        }
    }

    Ok(())
}

/// Start a password reset.
///
/// Always succeeds from the caller's point of view, whether or not the
/// email belongs to an account. Only the delivery log distinguishes the
/// two, so the endpoint can't be used to enumerate accounts.
///
/// # Errors
///
/// Returns an error only on a database failure.
pub async fn forgot_password(
    state: &AppState,
    tipo: Principal,
    email: &str,
) -> Result<(), AuthError> {
    let email = email.trim().to_lowercase();
    let pool = state.pool();

    let existe = match tipo {
        Principal::Admin => AdminRepository::new(pool)
            .get_by_email(&email)
            .await?
            .is_some(),
        Principal::Vendedor => VendedorRepository::new(pool)
            .get_by_email(&email)
            .await?
            .is_some(),
    };

    if !existe {
        tracing::debug!(%email, %tipo, "Restablecimiento solicitado para cuenta inexistente");
        return Ok(());
    }

    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RESET_TOKEN_LENGTH)
        .map(char::from)
        .collect();
    let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);

    ResetTokenRepository::new(pool)
        .create(&email, &token, tipo, expires_at)
        .await?;

    state.mailer().send_password_reset(&email, tipo, &token);

    Ok(())
}

/// Complete a password reset with a token from the emailed link.
///
/// The token is single use: it is consumed in the same call that
/// rewrites the password.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if the token is unknown, expired,
/// or its account no longer exists.
pub async fn reset_password(
    state: &AppState,
    token: &str,
    nueva: &str,
) -> Result<(), AuthError> {
    validate_password(nueva)?;

    let pool = state.pool();
    let tokens = ResetTokenRepository::new(pool);

    let registro = tokens.get(token).await?.ok_or(AuthError::InvalidToken)?;
    if registro.is_expired(Utc::now()) {
        tokens.consume(token).await?;
        return Err(AuthError::InvalidToken);
    }

    let hash = hash_password(nueva)?;

    match registro.tipo.as_str() {
        "admin" => {
            let repo = AdminRepository::new(pool);
            let admin = repo
                .get_by_email(&registro.email)
                .await?
                .ok_or(AuthError::InvalidToken)?;
            repo.update_password(&admin.id, &hash).await?;
        }
        "vendedor" => {
            let repo = VendedorRepository::new(pool);
            let vendedor = repo
                .get_by_email(&registro.email)
                .await?
                .ok_or(AuthError::InvalidToken)?;
            repo.update_password(&vendedor.id, &hash).await?;
        }
        otro => {
            return Err(AuthError::Repository(RepositoryError::DataCorruption(
                format!("unknown reset token tipo: {otro}"),
            )));
        }
    }

    tokens.consume(token).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("contraseña-segura").unwrap();
        assert!(verify_password("contraseña-segura", &hash));
        assert!(!verify_password("otra-cosa", &hash));
    }

    #[test]
    fn verify_tolerates_garbage_hash() {
        assert!(!verify_password("lo-que-sea", "no es un hash"));
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(validate_password("corta").is_err());
        assert!(validate_password("suficientemente-larga").is_ok());
    }
}
