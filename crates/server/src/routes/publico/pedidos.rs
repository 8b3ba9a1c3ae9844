//! Public order submission.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::db::{NuevoPedido, NuevoPedidoItem, TiendaRepository};
use crate::error::{AppError, Result};
use crate::services::pedidos::{self, PedidoCreado};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PedidoPayload {
    pub cliente_nombre: String,
    pub cliente_telefono: String,
    #[serde(default)]
    pub cliente_direccion: Option<String>,
    #[serde(default)]
    pub notas: Option<String>,
    pub items: Vec<ItemPayload>,
}

#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    pub producto_id: String,
    pub cantidad: i64,
}

/// `POST /api/tienda/{slug}/pedidos`
///
/// Validates the buyer fields, submits the order transactionally against
/// current stock and responds with the created order plus the WhatsApp
/// link that delivers it to the vendor.
pub async fn crear(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<PedidoPayload>,
) -> Result<(StatusCode, Json<PedidoCreado>)> {
    let tienda = TiendaRepository::new(state.pool())
        .get_activa_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Tienda no encontrada".to_owned()))?;

    if payload.cliente_nombre.trim().is_empty() || payload.cliente_telefono.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Nombre y teléfono del cliente son obligatorios".to_owned(),
        ));
    }

    let nuevo = NuevoPedido {
        cliente_nombre: payload.cliente_nombre.trim().to_owned(),
        cliente_telefono: payload.cliente_telefono.trim().to_owned(),
        cliente_direccion: payload.cliente_direccion,
        notas: payload.notas,
        items: payload
            .items
            .into_iter()
            .map(|i| NuevoPedidoItem {
                producto_id: i.producto_id,
                cantidad: i.cantidad,
            })
            .collect(),
    };

    let creado = pedidos::submit(&state, &tienda, &nuevo).await?;

    Ok((StatusCode::CREATED, Json(creado)))
}
