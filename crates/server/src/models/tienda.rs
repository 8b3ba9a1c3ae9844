//! Store (tenant) model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use mercadito_core::CategoriaGeneral;

/// A tenant store. The `slug` is the public routing key and is immutable
/// once created; `tienda_id` on every owned row is the isolation boundary.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tienda {
    pub id: String,
    pub nombre: String,
    pub slug: String,
    pub descripcion: Option<String>,
    pub categoria_general: CategoriaGeneral,
    pub whatsapp: String,
    pub direccion: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub activa: bool,
    pub plan_id: String,
    pub created_at: DateTime<Utc>,
}
