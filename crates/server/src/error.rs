//! Unified error handling for route handlers.
//!
//! Provides a unified `AppError` type; all route handlers return
//! `Result<T, AppError>`. Client-facing messages are JSON bodies of the
//! shape `{"error": "..."}`; server-side failures are logged and answered
//! with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::db::{PedidoRechazado, RepositoryError};
use crate::services::auth::AuthError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order submission rejected.
    #[error("Order rejected: {0}")]
    Pedido(#[from] PedidoRechazado),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                // Business conflicts surface as validation errors with a
                // user-facing message
                RepositoryError::Conflict(_) => StatusCode::BAD_REQUEST,
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::WeakPassword(_) | AuthError::InvalidToken => StatusCode::BAD_REQUEST,
                AuthError::Hash(_) | AuthError::Token(_) | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Pedido(err) => match err {
                PedidoRechazado::Repositorio(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Internal details never reach the client
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Error interno del servidor".to_owned()
        } else {
            match &self {
                Self::Database(RepositoryError::NotFound) => "No encontrado".to_owned(),
                Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
                Self::Auth(AuthError::InvalidCredentials) => "Credenciales inválidas".to_owned(),
                Self::Auth(AuthError::InvalidToken) => "Token inválido o expirado".to_owned(),
                Self::Auth(AuthError::WeakPassword(msg)) => msg.clone(),
                Self::Pedido(err) => err.to_string(),
                Self::NotFound(msg) | Self::Unauthorized(msg) | Self::BadRequest(msg) => {
                    msg.clone()
                }
                _ => self.to_string(),
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl AppError {
    fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Internal(_)
                | Self::Database(
                    RepositoryError::Database(_) | RepositoryError::DataCorruption(_)
                )
                | Self::Auth(AuthError::Hash(_) | AuthError::Token(_) | AuthError::Repository(_))
                | Self::Pedido(PedidoRechazado::Repositorio(_))
        )
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
