//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (DB ping)
//!
//! # Public storefront
//! GET  /api/tienda/{slug}               - Store profile + active catalog
//! POST /api/tienda/{slug}/pedidos       - Submit an order
//! GET  /api/archivos/{id}               - Serve a stored file (Range-aware)
//!
//! # Admin (cookie mercadito_admin)
//! POST   /api/admin/auth                - Login
//! DELETE /api/admin/auth                - Logout
//! POST   /api/admin/auth/forgot-password
//! POST   /api/admin/auth/reset-password
//! GET|POST        /api/admin/planes     - List / create plans
//! GET|PUT|DELETE  /api/admin/planes/{id}
//! GET|POST        /api/admin/tiendas    - List / create stores (+vendor)
//! GET|PUT|DELETE  /api/admin/tiendas/{id}
//!
//! # Vendor (cookie mercadito_vendedor)
//! POST   /api/vendedor/auth             - Login
//! DELETE /api/vendedor/auth             - Logout
//! POST   /api/vendedor/auth/change-password
//! POST   /api/vendedor/auth/forgot-password
//! POST   /api/vendedor/auth/reset-password
//! GET|POST        /api/vendedor/productos     - Catalog (multipart uploads)
//! GET|PUT|DELETE  /api/vendedor/productos/{id}
//! GET|POST        /api/vendedor/categorias
//! PUT|DELETE      /api/vendedor/categorias/{id}
//! GET             /api/vendedor/pedidos
//! GET|PUT         /api/vendedor/pedidos/{id}  - PUT moves estado only
//! GET|PUT         /api/vendedor/tienda        - Own store profile
//! POST            /api/vendedor/tienda/archivos - Logo/banner upload
//! ```

pub mod admin;
pub mod publico;
pub mod vendedor;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::error::Result;
use crate::state::AppState;

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .nest("/api/admin", admin::routes())
        .nest("/api/vendedor", vendedor::routes())
        .merge(publico::routes())
}

/// Liveness check.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness check: pings the database.
async fn ready(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<serde_json::Value>> {
    sqlx::query("SELECT 1")
        .execute(state.pool())
        .await
        .map_err(|e| crate::error::AppError::Internal(format!("database unreachable: {e}")))?;
    Ok(Json(json!({ "status": "ready" })))
}
