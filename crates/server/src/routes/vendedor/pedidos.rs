//! Vendor order endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use mercadito_core::EstadoPedido;

use crate::db::PedidoRepository;
use crate::error::{AppError, Result};
use crate::models::{ItemPedido, Pedido};
use crate::session::VendedorSession;
use crate::state::AppState;

#[derive(Serialize)]
pub struct PedidoDetalle {
    #[serde(flatten)]
    pub pedido: Pedido,
    pub items: Vec<ItemPedido>,
}

#[derive(Debug, Deserialize)]
pub struct ActualizarPedidoPayload {
    pub estado: EstadoPedido,
}

/// `GET /api/vendedor/pedidos`
pub async fn list(
    session: VendedorSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Pedido>>> {
    let pedidos = PedidoRepository::new(state.pool())
        .list(&session.tienda_id)
        .await?;
    Ok(Json(pedidos))
}

/// `GET /api/vendedor/pedidos/{id}`
pub async fn show(
    session: VendedorSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PedidoDetalle>> {
    let repo = PedidoRepository::new(state.pool());
    let pedido = repo
        .get(&session.tienda_id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Pedido no encontrado".to_owned()))?;
    let items = repo.items(&pedido.id).await?;
    Ok(Json(PedidoDetalle { pedido, items }))
}

/// `PUT /api/vendedor/pedidos/{id}`
///
/// Only the estado moves; everything else on an order is immutable.
pub async fn update(
    session: VendedorSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ActualizarPedidoPayload>,
) -> Result<Json<PedidoDetalle>> {
    let repo = PedidoRepository::new(state.pool());
    repo.update_estado(&session.tienda_id, &id, payload.estado)
        .await?;

    let pedido = repo
        .get(&session.tienda_id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Pedido no encontrado".to_owned()))?;
    let items = repo.items(&pedido.id).await?;
    Ok(Json(PedidoDetalle { pedido, items }))
}
