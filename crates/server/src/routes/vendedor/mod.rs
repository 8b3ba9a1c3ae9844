//! Vendor routes. Everything except auth requires the
//! `mercadito_vendedor` session cookie; every handler scopes its queries
//! to the session's store.

pub mod auth;
pub mod categorias;
pub mod pedidos;
pub mod productos;
pub mod tienda;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Create the vendor routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth", post(auth::login).delete(auth::logout))
        .route("/auth/change-password", post(auth::change_password))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/productos", get(productos::list).post(productos::create))
        .route(
            "/productos/{id}",
            get(productos::show)
                .put(productos::update)
                .delete(productos::delete),
        )
        .route(
            "/categorias",
            get(categorias::list).post(categorias::create),
        )
        .route(
            "/categorias/{id}",
            axum::routing::put(categorias::update).delete(categorias::delete),
        )
        .route("/pedidos", get(pedidos::list))
        .route("/pedidos/{id}", get(pedidos::show).put(pedidos::update))
        .route("/tienda", get(tienda::show).put(tienda::update))
        .route("/tienda/archivos", post(tienda::upload_branding))
}
