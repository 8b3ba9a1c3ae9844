//! Order submission service.
//!
//! Wraps the transactional order insert with the WhatsApp handoff: once
//! the order is committed, the response carries a `wa.me` link the buyer
//! opens to deliver the order to the vendor.

use serde::Serialize;

use mercadito_core::whatsapp::{mensaje_pedido, url_whatsapp, LineaMensaje};

use crate::db::{NuevoPedido, PedidoRechazado, PedidoRepository};
use crate::models::{ItemPedido, Pedido, Tienda};
use crate::state::AppState;

/// A successfully submitted order and its delivery link.
#[derive(Debug, Serialize)]
pub struct PedidoCreado {
    pub success: bool,
    pub pedido: Pedido,
    pub items: Vec<ItemPedido>,
    pub whatsapp_url: String,
}

/// Submit an order against a store and compose its WhatsApp link.
///
/// # Errors
///
/// Returns `PedidoRechazado` when any line can't be honored; nothing is
/// written in that case.
pub async fn submit(
    state: &AppState,
    tienda: &Tienda,
    nuevo: &NuevoPedido,
) -> Result<PedidoCreado, PedidoRechazado> {
    let repo = PedidoRepository::new(state.pool());
    let (mut pedido, items) = repo.crear(&tienda.id, nuevo).await?;

    let lineas: Vec<LineaMensaje> = items
        .iter()
        .map(|item| LineaMensaje {
            nombre: item.nombre_producto.clone(),
            cantidad: item.cantidad,
            precio_unitario: item.precio_unitario.amount(),
        })
        .collect();

    let mensaje = mensaje_pedido(
        pedido.numero_pedido,
        &pedido.cliente_nombre,
        &pedido.cliente_telefono,
        &lineas,
        pedido.total.amount(),
        pedido.notas.as_deref(),
    );
    let whatsapp_url = url_whatsapp(&tienda.whatsapp, &mensaje);

    // The link was composed and handed back; best effort on the flag.
    match repo.marcar_enviado(&pedido.id).await {
        Ok(()) => pedido.enviado_whatsapp = true,
        Err(e) => {
            tracing::warn!(error = %e, pedido_id = %pedido.id, "No se pudo marcar el pedido como enviado");
        }
    }

    tracing::info!(
        tienda = %tienda.slug,
        numero_pedido = pedido.numero_pedido,
        total = %pedido.total,
        "Pedido recibido"
    );

    Ok(PedidoCreado {
        success: true,
        pedido,
        items,
        whatsapp_url,
    })
}
