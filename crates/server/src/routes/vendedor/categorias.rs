//! Vendor category endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::db::CategoriaRepository;
use crate::error::{AppError, Result};
use crate::models::CategoriaProducto;
use crate::session::VendedorSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CrearCategoriaPayload {
    pub nombre: String,
}

#[derive(Debug, Deserialize)]
pub struct ActualizarCategoriaPayload {
    pub nombre: String,
    pub activa: bool,
}

/// `GET /api/vendedor/categorias`
pub async fn list(
    session: VendedorSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoriaProducto>>> {
    let categorias = CategoriaRepository::new(state.pool())
        .list(&session.tienda_id)
        .await?;
    Ok(Json(categorias))
}

/// `POST /api/vendedor/categorias`
pub async fn create(
    session: VendedorSession,
    State(state): State<AppState>,
    Json(payload): Json<CrearCategoriaPayload>,
) -> Result<(StatusCode, Json<CategoriaProducto>)> {
    let nombre = payload.nombre.trim();
    if nombre.is_empty() {
        return Err(AppError::BadRequest("El nombre es obligatorio".to_owned()));
    }

    let categoria = CategoriaRepository::new(state.pool())
        .create(&session.tienda_id, nombre)
        .await?;
    Ok((StatusCode::CREATED, Json(categoria)))
}

/// `PUT /api/vendedor/categorias/{id}`
pub async fn update(
    session: VendedorSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ActualizarCategoriaPayload>,
) -> Result<StatusCode> {
    let nombre = payload.nombre.trim();
    if nombre.is_empty() {
        return Err(AppError::BadRequest("El nombre es obligatorio".to_owned()));
    }

    CategoriaRepository::new(state.pool())
        .update(&session.tienda_id, &id, nombre, payload.activa)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/vendedor/categorias/{id}`
///
/// Products in the category survive with their category detached.
pub async fn delete(
    session: VendedorSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    CategoriaRepository::new(state.pool())
        .delete(&session.tienda_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
