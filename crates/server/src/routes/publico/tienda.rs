//! Public store profile and catalog.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::db::{ArchivoRepository, CategoriaRepository, ProductoRepository, TiendaRepository};
use crate::error::{AppError, Result};
use crate::models::{Archivo, CategoriaProducto, Producto, Tienda};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProductoPublico {
    #[serde(flatten)]
    pub producto: Producto,
    pub archivos: Vec<Archivo>,
}

#[derive(Serialize)]
pub struct TiendaPublica {
    #[serde(flatten)]
    pub tienda: Tienda,
    pub categorias: Vec<CategoriaProducto>,
    pub productos: Vec<ProductoPublico>,
    pub archivos: Vec<Archivo>,
}

/// `GET /api/tienda/{slug}`
///
/// The whole public storefront payload: profile, branding files, active
/// categories and active products with their media. Inactive stores 404.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<TiendaPublica>> {
    let pool = state.pool();

    let tienda = TiendaRepository::new(pool)
        .get_activa_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Tienda no encontrada".to_owned()))?;

    let categorias = CategoriaRepository::new(pool).list_activas(&tienda.id).await?;
    let productos = ProductoRepository::new(pool).list_activos(&tienda.id).await?;

    let archivos_repo = ArchivoRepository::new(pool);
    let mut con_archivos = Vec::with_capacity(productos.len());
    for producto in productos {
        let archivos = archivos_repo
            .list_by_producto(&tienda.id, &producto.id)
            .await?;
        con_archivos.push(ProductoPublico { producto, archivos });
    }

    let branding = archivos_repo.list_branding(&tienda.id).await?;

    Ok(Json(TiendaPublica {
        tienda,
        categorias,
        productos: con_archivos,
        archivos: branding,
    }))
}
