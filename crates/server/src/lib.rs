//! Mercadito server library.
//!
//! Multi-tenant storefront backend: platform admins provision stores and
//! plans, each store has one vendor managing its catalog, and the public
//! storefront submits orders that are relayed to the vendor over
//! WhatsApp. One axum router, one SQLite database, tenant isolation by
//! `tienda_id` on every vendor-side query.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use state::AppState;

/// Multipart uploads carry whole videos; the default 2 MB limit is far
/// too small.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Build the application router with all middleware applied.
#[must_use]
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
