//! Platform admin routes. Everything except auth requires the
//! `mercadito_admin` session cookie.

pub mod auth;
pub mod planes;
pub mod tiendas;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Create the admin routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth", post(auth::login).delete(auth::logout))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/planes", get(planes::list).post(planes::create))
        .route(
            "/planes/{id}",
            get(planes::show).put(planes::update).delete(planes::delete),
        )
        .route("/tiendas", get(tiendas::list).post(tiendas::create))
        .route(
            "/tiendas/{id}",
            get(tiendas::show)
                .put(tiendas::update)
                .delete(tiendas::delete),
        )
}
