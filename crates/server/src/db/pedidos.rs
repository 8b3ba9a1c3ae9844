//! Order repository and the order submission transaction.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use mercadito_core::{EstadoPedido, Precio};

use super::RepositoryError;
use crate::models::{ItemPedido, Pedido, Producto};

/// Input for submitting an order.
#[derive(Debug, Clone)]
pub struct NuevoPedido {
    pub cliente_nombre: String,
    pub cliente_telefono: String,
    pub cliente_direccion: Option<String>,
    pub notas: Option<String>,
    pub items: Vec<NuevoPedidoItem>,
}

/// One requested line of an order.
#[derive(Debug, Clone)]
pub struct NuevoPedidoItem {
    pub producto_id: String,
    pub cantidad: i64,
}

/// Why an order submission was rejected.
#[derive(Debug, Error)]
pub enum PedidoRechazado {
    #[error("El pedido no tiene productos")]
    SinItems,

    #[error("Producto no disponible")]
    ProductoNoDisponible,

    #[error("Stock insuficiente para {nombre}")]
    StockInsuficiente { nombre: String },

    #[error(transparent)]
    Repositorio(#[from] RepositoryError),
}

impl From<sqlx::Error> for PedidoRechazado {
    fn from(e: sqlx::Error) -> Self {
        Self::Repositorio(RepositoryError::Database(e))
    }
}

/// Repository for order database operations.
pub struct PedidoRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PedidoRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Submit an order against a store's catalog.
    ///
    /// Runs as one transaction: every line is validated against current
    /// stock, the store's next sequential order number is taken, the
    /// order and its snapshot lines are written, and stock is
    /// decremented. Any failed line rolls the whole order back, so stock
    /// never goes negative and order numbers never collide or gap under
    /// concurrent submissions.
    ///
    /// Unit prices honor the sale price when one is set.
    ///
    /// # Errors
    ///
    /// Returns `PedidoRechazado::SinItems` for an empty order,
    /// `ProductoNoDisponible` if any line names a missing or inactive
    /// product, and `StockInsuficiente` if any line exceeds stock.
    pub async fn crear(
        &self,
        tienda_id: &str,
        nuevo: &NuevoPedido,
    ) -> Result<(Pedido, Vec<ItemPedido>), PedidoRechazado> {
        if nuevo.items.is_empty() {
            return Err(PedidoRechazado::SinItems);
        }

        let mut tx = self.pool.begin().await?;

        let mut lineas = Vec::with_capacity(nuevo.items.len());
        let mut subtotal = Decimal::ZERO;

        for item in &nuevo.items {
            let producto = sqlx::query_as::<_, Producto>(
                "SELECT * FROM productos WHERE id = ? AND tienda_id = ? AND activo = 1",
            )
            .bind(&item.producto_id)
            .bind(tienda_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(PedidoRechazado::ProductoNoDisponible)?;

            if item.cantidad <= 0 || producto.stock < item.cantidad {
                return Err(PedidoRechazado::StockInsuficiente {
                    nombre: producto.nombre,
                });
            }

            let precio_unitario = producto.precio_efectivo();
            let linea = precio_unitario.por(item.cantidad);
            subtotal += linea;
            lineas.push((producto, item.cantidad, precio_unitario, linea));
        }

        let (numero_pedido,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(MAX(numero_pedido), 0) + 1 FROM pedidos WHERE tienda_id = ?",
        )
        .bind(tienda_id)
        .fetch_one(&mut *tx)
        .await?;

        let pedido_id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let total = Precio::new(subtotal);

        sqlx::query(
            r"
            INSERT INTO pedidos
                (id, numero_pedido, cliente_nombre, cliente_telefono, cliente_direccion,
                 notas, subtotal, total, estado, enviado_whatsapp, tienda_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'pendiente', 0, ?, ?)
            ",
        )
        .bind(&pedido_id)
        .bind(numero_pedido)
        .bind(&nuevo.cliente_nombre)
        .bind(&nuevo.cliente_telefono)
        .bind(&nuevo.cliente_direccion)
        .bind(&nuevo.notas)
        .bind(total)
        .bind(total)
        .bind(tienda_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(lineas.len());
        for (producto, cantidad, precio_unitario, linea) in lineas {
            let item_id = Uuid::new_v4().to_string();

            sqlx::query(
                r"
                INSERT INTO items_pedido
                    (id, pedido_id, producto_id, nombre_producto, precio_unitario,
                     cantidad, subtotal)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(&item_id)
            .bind(&pedido_id)
            .bind(&producto.id)
            .bind(&producto.nombre)
            .bind(precio_unitario)
            .bind(cantidad)
            .bind(Precio::new(linea))
            .execute(&mut *tx)
            .await?;

            let decremento = sqlx::query(
                "UPDATE productos SET stock = stock - ? WHERE id = ? AND stock >= ?",
            )
            .bind(cantidad)
            .bind(&producto.id)
            .bind(cantidad)
            .execute(&mut *tx)
            .await?;

            if decremento.rows_affected() == 0 {
                return Err(PedidoRechazado::StockInsuficiente {
                    nombre: producto.nombre,
                });
            }

            items.push(ItemPedido {
                id: item_id,
                pedido_id: pedido_id.clone(),
                producto_id: Some(producto.id),
                nombre_producto: producto.nombre,
                precio_unitario,
                cantidad,
                subtotal: Precio::new(linea),
            });
        }

        tx.commit().await?;

        let pedido = Pedido {
            id: pedido_id,
            numero_pedido,
            cliente_nombre: nuevo.cliente_nombre.clone(),
            cliente_telefono: nuevo.cliente_telefono.clone(),
            cliente_direccion: nuevo.cliente_direccion.clone(),
            notas: nuevo.notas.clone(),
            subtotal: total,
            total,
            estado: EstadoPedido::Pendiente,
            enviado_whatsapp: false,
            tienda_id: tienda_id.to_owned(),
            created_at: now,
        };

        Ok((pedido, items))
    }

    /// List a store's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, tienda_id: &str) -> Result<Vec<Pedido>, RepositoryError> {
        let pedidos = sqlx::query_as::<_, Pedido>(
            "SELECT * FROM pedidos WHERE tienda_id = ? ORDER BY created_at DESC",
        )
        .bind(tienda_id)
        .fetch_all(self.pool)
        .await?;

        Ok(pedidos)
    }

    /// Get an order within a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        tienda_id: &str,
        id: &str,
    ) -> Result<Option<Pedido>, RepositoryError> {
        let pedido =
            sqlx::query_as::<_, Pedido>("SELECT * FROM pedidos WHERE id = ? AND tienda_id = ?")
                .bind(id)
                .bind(tienda_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(pedido)
    }

    /// Get an order's lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, pedido_id: &str) -> Result<Vec<ItemPedido>, RepositoryError> {
        let items =
            sqlx::query_as::<_, ItemPedido>("SELECT * FROM items_pedido WHERE pedido_id = ?")
                .bind(pedido_id)
                .fetch_all(self.pool)
                .await?;

        Ok(items)
    }

    /// Update an order's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order isn't in this store.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_estado(
        &self,
        tienda_id: &str,
        id: &str,
        estado: EstadoPedido,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE pedidos SET estado = ? WHERE id = ? AND tienda_id = ?")
                .bind(estado)
                .bind(id)
                .bind(tienda_id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Record that the order was handed off to the messaging link.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn marcar_enviado(&self, id: &str) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE pedidos SET enviado_whatsapp = 1 WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
