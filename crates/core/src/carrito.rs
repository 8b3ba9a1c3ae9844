//! Client-side cart state.
//!
//! The cart lives in the shopper's browser under a single storage slot shared
//! by every storefront (`CLAVE_ALMACEN`). Initializing the cart for a store
//! whose slug differs from the stored one discards the old contents, so a
//! cart never bleeds across tenants. Quantities are clamped to the stock
//! known at add-time; the clamp is a hint, the order workflow on the server
//! is the authority.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Precio;

/// Storage key for the cart slot. One slot per browser, not per tenant.
pub const CLAVE_ALMACEN: &str = "mercadito_carrito";

/// A product as presented to the cart (no quantity yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductoCarrito {
    pub producto_id: String,
    pub nombre: String,
    pub precio: Precio,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precio_oferta: Option<Precio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen_id: Option<String>,
    /// Stock known at add-time; quantities are clamped to this ceiling.
    pub stock: u32,
}

/// A cart line: a product plus the chosen quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCarrito {
    #[serde(flatten)]
    pub producto: ProductoCarrito,
    pub cantidad: u32,
}

impl ItemCarrito {
    /// Sale price when present, regular price otherwise. Same rule the order
    /// workflow applies when it snapshots unit prices.
    #[must_use]
    pub fn precio_efectivo(&self) -> Precio {
        self.producto.precio_oferta.unwrap_or(self.producto.precio)
    }

    /// Line subtotal at the effective price.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.precio_efectivo().por(i64::from(self.cantidad))
    }
}

/// Cart contents for one tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Carrito {
    pub tienda_slug: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemCarrito>,
}

impl Carrito {
    /// Fresh empty cart for a store.
    #[must_use]
    pub fn nuevo(tienda_slug: &str) -> Self {
        Self {
            tienda_slug: Some(tienda_slug.to_owned()),
            items: Vec::new(),
        }
    }

    /// Load the cart from the stored slot for a target store.
    ///
    /// A slug mismatch or corrupt payload reinitializes the cart empty for
    /// the new store; the previous tenant's in-progress cart is dropped.
    #[must_use]
    pub fn cargar(almacenado: Option<&str>, tienda_slug: &str) -> Self {
        let Some(crudo) = almacenado else {
            return Self::nuevo(tienda_slug);
        };
        match serde_json::from_str::<Self>(crudo) {
            Ok(carrito) if carrito.tienda_slug.as_deref() == Some(tienda_slug) => carrito,
            _ => Self::nuevo(tienda_slug),
        }
    }

    /// Serialize for the storage slot.
    #[must_use]
    pub fn a_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Add `cantidad` units of a product, merging with an existing line.
    ///
    /// The resulting quantity is clamped to the product's known stock.
    pub fn agregar(&mut self, producto: ProductoCarrito, cantidad: u32) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.producto.producto_id == producto.producto_id)
        {
            item.cantidad = item.cantidad.saturating_add(cantidad).min(producto.stock);
            item.producto = producto;
        } else {
            let cantidad = cantidad.min(producto.stock);
            self.items.push(ItemCarrito { producto, cantidad });
        }
    }

    /// Set a line's quantity. Zero removes the line; anything else is
    /// clamped to the line's stock ceiling.
    pub fn actualizar(&mut self, producto_id: &str, cantidad: u32) {
        if cantidad == 0 {
            self.eliminar(producto_id);
            return;
        }
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.producto.producto_id == producto_id)
        {
            item.cantidad = cantidad.min(item.producto.stock);
        }
    }

    /// Remove a line.
    pub fn eliminar(&mut self, producto_id: &str) {
        self.items.retain(|i| i.producto.producto_id != producto_id);
    }

    /// Empty the cart, keeping the tenant binding.
    pub fn vaciar(&mut self) {
        self.items.clear();
    }

    /// Quantity currently in the cart for a product (0 when absent).
    #[must_use]
    pub fn obtener_cantidad(&self, producto_id: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.producto.producto_id == producto_id)
            .map_or(0, |i| i.cantidad)
    }

    /// Cart total at effective prices. Derived, never stored.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(ItemCarrito::subtotal).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.cantidad).sum()
    }
}
