//! Business logic services.

pub mod auth;
pub mod mailer;
pub mod pedidos;
