//! Subscription plan model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use mercadito_core::Precio;

/// A subscription plan. Referenced by stores; cannot be deleted while any
/// store still points at it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Plan {
    pub id: String,
    pub nombre: String,
    pub precio_mensual: Precio,
    pub permite_videos: bool,
    pub max_productos: i64,
    pub max_imagenes_por_producto: i64,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}
