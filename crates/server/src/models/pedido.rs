//! Order models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use mercadito_core::{EstadoPedido, Precio};

/// A submitted order. `numero_pedido` is sequential per store, starting
/// at 1, and unique within the store.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Pedido {
    pub id: String,
    pub numero_pedido: i64,
    pub cliente_nombre: String,
    pub cliente_telefono: String,
    pub cliente_direccion: Option<String>,
    pub notas: Option<String>,
    pub subtotal: Precio,
    pub total: Precio,
    pub estado: EstadoPedido,
    pub enviado_whatsapp: bool,
    pub tienda_id: String,
    pub created_at: DateTime<Utc>,
}

/// An order line. Product name and unit price are snapshots taken at
/// submission time so later catalog edits never rewrite history.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ItemPedido {
    pub id: String,
    pub pedido_id: String,
    pub producto_id: Option<String>,
    pub nombre_producto: String,
    pub precio_unitario: Precio,
    pub cantidad: i64,
    pub subtotal: Precio,
}
