//! Mercadito Core - Shared domain types.
//!
//! This crate provides the types shared between `mercadito-server` and any
//! future clients of the Mercadito storefront platform.
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. The `sqlite` feature adds `sqlx` column mappings
//! for the enums and the price type, nothing more.
//!
//! # Modules
//!
//! - [`types`] - Enums, the price type, and slug validation
//! - [`carrito`] - Client-side cart state (per-tenant storage slot)
//! - [`whatsapp`] - Order message composer and `wa.me` deep links

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carrito;
pub mod types;
pub mod whatsapp;

pub use types::*;
