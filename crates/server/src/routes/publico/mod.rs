//! Public storefront routes. No authentication.

pub mod archivos;
pub mod pedidos;
pub mod tienda;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Create the public routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/tienda/{slug}", get(tienda::show))
        .route("/api/tienda/{slug}/pedidos", post(pedidos::crear))
        .route("/api/archivos/{id}", get(archivos::servir))
}
