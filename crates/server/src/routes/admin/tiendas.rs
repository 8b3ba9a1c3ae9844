//! Store management endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use mercadito_core::{slugify, validar_slug, CategoriaGeneral};

use crate::db::{NuevaTienda, PerfilTienda, PlanRepository, TiendaRepository, TiendaResumen};
use crate::error::{AppError, Result};
use crate::models::Tienda;
use crate::services::auth::{hash_password, validate_password};
use crate::session::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CrearTiendaPayload {
    pub nombre: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub categoria_general: CategoriaGeneral,
    pub whatsapp: String,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub latitud: Option<f64>,
    #[serde(default)]
    pub longitud: Option<f64>,
    pub plan_id: String,
    pub vendedor_nombre: String,
    pub vendedor_email: String,
    pub vendedor_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ActualizarTiendaPayload {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub categoria_general: CategoriaGeneral,
    pub whatsapp: String,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub latitud: Option<f64>,
    #[serde(default)]
    pub longitud: Option<f64>,
    pub plan_id: String,
    pub activa: bool,
}

/// `GET /api/admin/tiendas`
pub async fn list(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<TiendaResumen>>> {
    let tiendas = TiendaRepository::new(state.pool()).list().await?;
    Ok(Json(tiendas))
}

/// `GET /api/admin/tiendas/{id}`
pub async fn show(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Tienda>> {
    let tienda = TiendaRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tienda no encontrada".to_owned()))?;
    Ok(Json(tienda))
}

/// `POST /api/admin/tiendas`
///
/// Creates the store and its vendor account in one transaction. The
/// slug is taken as given (validated) or derived from the store name.
pub async fn create(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CrearTiendaPayload>,
) -> Result<(StatusCode, Json<Tienda>)> {
    let pool = state.pool();

    if payload.nombre.trim().is_empty() || payload.whatsapp.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Nombre y WhatsApp son obligatorios".to_owned(),
        ));
    }

    let slug = match &payload.slug {
        Some(slug) => {
            validar_slug(slug).map_err(|e| AppError::BadRequest(e.to_string()))?;
            slug.clone()
        }
        None => {
            let derivado = slugify(&payload.nombre);
            validar_slug(&derivado).map_err(|e| AppError::BadRequest(e.to_string()))?;
            derivado
        }
    };

    PlanRepository::new(pool)
        .get(&payload.plan_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Plan no encontrado".to_owned()))?;

    validate_password(&payload.vendedor_password)?;
    let password_hash = hash_password(&payload.vendedor_password)?;

    let nueva = NuevaTienda {
        nombre: payload.nombre.trim().to_owned(),
        slug,
        descripcion: payload.descripcion,
        categoria_general: payload.categoria_general,
        whatsapp: payload.whatsapp.trim().to_owned(),
        direccion: payload.direccion,
        latitud: payload.latitud,
        longitud: payload.longitud,
        plan_id: payload.plan_id,
        vendedor_nombre: payload.vendedor_nombre.trim().to_owned(),
        vendedor_email: payload.vendedor_email.trim().to_lowercase(),
        vendedor_password_hash: password_hash,
    };

    let tienda = TiendaRepository::new(pool).create(&nueva).await?;
    Ok((StatusCode::CREATED, Json(tienda)))
}

/// `PUT /api/admin/tiendas/{id}`
///
/// Admin-side update: profile fields plus plan and activation. The slug
/// never changes after creation.
pub async fn update(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ActualizarTiendaPayload>,
) -> Result<Json<Tienda>> {
    let pool = state.pool();
    let repo = TiendaRepository::new(pool);

    PlanRepository::new(pool)
        .get(&payload.plan_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Plan no encontrado".to_owned()))?;

    let perfil = PerfilTienda {
        nombre: payload.nombre.trim().to_owned(),
        descripcion: payload.descripcion,
        categoria_general: payload.categoria_general,
        whatsapp: payload.whatsapp.trim().to_owned(),
        direccion: payload.direccion,
        latitud: payload.latitud,
        longitud: payload.longitud,
    };

    let tienda = repo
        .update_admin(&id, &perfil, &payload.plan_id, payload.activa)
        .await?;
    Ok(Json(tienda))
}

/// `DELETE /api/admin/tiendas/{id}`
pub async fn delete(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    TiendaRepository::new(state.pool()).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
