//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SESSION_SECRET` - Session token signing secret (min 32 chars)
//! - `ADMIN_EMAIL` - Bootstrap admin account email
//! - `ADMIN_PASSWORD` - Bootstrap admin account password
//!
//! ## Optional
//! - `DATABASE_URL` - SQLite connection string (default: sqlite:mercadito.db)
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3000)
//! - `BASE_URL` - Public base URL, used to build password-reset links
//!   (default: http://localhost:3000)
//! - `EMAIL_USER` / `EMAIL_APP_PASSWORD` - Credentials for the outbound
//!   notification sender; reset links are only logged when absent

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite connection string
    pub database_url: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for reset links
    pub base_url: String,
    /// Session token signing secret
    pub session_secret: SecretString,
    /// Bootstrap admin email
    pub admin_email: String,
    /// Bootstrap admin password
    pub admin_password: SecretString,
    /// Outbound mail credentials, if configured
    pub email: Option<EmailConfig>,
}

/// Credentials for the outbound notification sender.
#[derive(Clone)]
pub struct EmailConfig {
    pub user: String,
    pub app_password: SecretString,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("user", &self.user)
            .field("app_password", &"[REDACTED]")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the session secret fails the minimum-length check.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let database_url =
            get_env_or_default("DATABASE_URL", "sqlite:mercadito.db?mode=rwc");
        let host = get_env_or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_owned(), e.to_string()))?;
        let base_url = get_env_or_default("BASE_URL", "http://localhost:3000");

        let session_secret = SecretString::from(get_required_env("SESSION_SECRET")?);
        validate_session_secret(&session_secret, "SESSION_SECRET")?;

        let admin_email = get_required_env("ADMIN_EMAIL")?.trim().to_lowercase();
        let admin_password = SecretString::from(get_required_env("ADMIN_PASSWORD")?);

        let email = match (get_optional_env("EMAIL_USER"), get_optional_env("EMAIL_APP_PASSWORD"))
        {
            (Some(user), Some(pass)) => Some(EmailConfig {
                user,
                app_password: SecretString::from(pass),
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            admin_email,
            admin_password,
            email,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Validate that the session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}
