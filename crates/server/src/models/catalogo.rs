//! Catalog models: product categories, products, stored files.

use chrono::{DateTime, Utc};
use serde::Serialize;

use mercadito_core::{Precio, TipoArchivo};

/// A per-store product category. Ordering is explicit via `orden`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoriaProducto {
    pub id: String,
    pub nombre: String,
    pub activa: bool,
    pub orden: i64,
    pub tienda_id: String,
    pub created_at: DateTime<Utc>,
}

/// A product in a store's catalog.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Producto {
    pub id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Precio,
    pub precio_oferta: Option<Precio>,
    pub stock: i64,
    pub activo: bool,
    pub destacado: bool,
    pub categoria_id: Option<String>,
    pub tienda_id: String,
    pub created_at: DateTime<Utc>,
}

impl Producto {
    /// Sale price when set, list price otherwise.
    #[must_use]
    pub fn precio_efectivo(&self) -> Precio {
        self.precio_oferta.unwrap_or(self.precio)
    }
}

/// File metadata without the blob. Listing queries use this so product
/// pages never drag megabytes of image data through the pool.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Archivo {
    pub id: String,
    pub tipo: TipoArchivo,
    pub nombre_original: String,
    pub mime_type: String,
    pub tamano: i64,
    pub orden: i64,
    pub tienda_id: String,
    pub producto_id: Option<String>,
    pub es_logo: bool,
    pub es_banner: bool,
    pub created_at: DateTime<Utc>,
}

/// A stored file with its bytes, fetched only when serving the content
/// endpoint.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArchivoDatos {
    pub id: String,
    pub nombre_original: String,
    pub mime_type: String,
    pub tamano: i64,
    pub data: Vec<u8>,
}
