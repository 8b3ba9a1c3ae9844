//! Vendor store profile endpoints.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use mercadito_core::{CategoriaGeneral, TipoArchivo};

use crate::db::{ArchivoRepository, NuevoArchivo, PerfilTienda, TiendaRepository};
use crate::error::{AppError, Result};
use crate::models::{Archivo, Tienda};
use crate::session::VendedorSession;
use crate::state::AppState;

#[derive(Serialize)]
pub struct TiendaPropia {
    #[serde(flatten)]
    pub tienda: Tienda,
    pub archivos: Vec<Archivo>,
}

#[derive(Debug, Deserialize)]
pub struct PerfilPayload {
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
}

/// `GET /api/vendedor/tienda`
pub async fn show(
    session: VendedorSession,
    State(state): State<AppState>,
) -> Result<Json<TiendaPropia>> {
    let pool = state.pool();
    let tienda = TiendaRepository::new(pool)
        .get(&session.tienda_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tienda no encontrada".to_owned()))?;
    let archivos = ArchivoRepository::new(pool)
        .list_branding(&session.tienda_id)
        .await?;
    Ok(Json(TiendaPropia { tienda, archivos }))
}

/// `PUT /api/vendedor/tienda`
///
/// The vendor edits profile fields only; slug, plan and activation
/// belong to the admin.
pub async fn update(
    session: VendedorSession,
    State(state): State<AppState>,
    Json(payload): Json<PerfilPayload>,
) -> Result<Json<Tienda>> {
    if payload.nombre.trim().is_empty() || payload.whatsapp.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Nombre y WhatsApp son obligatorios".to_owned(),
        ));
    }

    let perfil = PerfilTienda {
        nombre: payload.nombre.trim().to_owned(),
        descripcion: payload.descripcion,
        categoria_general: payload.categoria_general,
        whatsapp: payload.whatsapp.trim().to_owned(),
        direccion: payload.direccion,
        latitud: payload.latitud,
        longitud: payload.longitud,
    };

    let tienda = TiendaRepository::new(state.pool())
        .update_perfil(&session.tienda_id, &perfil)
        .await?;
    Ok(Json(tienda))
}

/// `POST /api/vendedor/tienda/archivos`
///
/// Uploads the store logo or banner. A `tipo` text part of `logo` or
/// `banner` picks the slot; the previous holder is replaced in the same
/// transaction.
pub async fn upload_branding(
    session: VendedorSession,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Archivo>)> {
    let mut tipo_slot: Option<String> = None;
    let mut archivo: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("tipo") => {
                tipo_slot = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            Some("archivo") => {
                let nombre = field.file_name().unwrap_or("archivo").to_owned();
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec();
                archivo = Some((nombre, mime, data));
            }
            _ => {}
        }
    }

    let tipo_slot =
        tipo_slot.ok_or_else(|| AppError::BadRequest("Falta el campo tipo".to_owned()))?;
    let (nombre, mime, data) =
        archivo.ok_or_else(|| AppError::BadRequest("Falta el archivo".to_owned()))?;

    let (es_logo, es_banner) = match tipo_slot.as_str() {
        "logo" => (true, false),
        "banner" => (false, true),
        _ => {
            return Err(AppError::BadRequest(
                "El tipo debe ser logo o banner".to_owned(),
            ));
        }
    };

    if TipoArchivo::from_mime(&mime) != TipoArchivo::Imagen {
        return Err(AppError::BadRequest(
            "El logo y el banner deben ser imágenes".to_owned(),
        ));
    }

    let creado = ArchivoRepository::new(state.pool())
        .create(
            &session.tienda_id,
            NuevoArchivo {
                tipo: TipoArchivo::Imagen,
                nombre_original: nombre,
                mime_type: mime,
                data,
                producto_id: None,
                es_logo,
                es_banner,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(creado)))
}
