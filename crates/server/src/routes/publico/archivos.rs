//! Serving stored files, with byte-range support for video playback.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Response, StatusCode};

use crate::db::ArchivoRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

const CACHE_CONTROL: &str = "public, max-age=86400";

/// `GET /api/archivos/{id}`
///
/// Serves a stored file. Video requests with a `Range` header get a 206
/// slice so browsers can seek; everything else gets the full body. File
/// IDs are random UUIDs, which is the access control here.
pub async fn servir(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response<Body>> {
    let Some(archivo) = ArchivoRepository::new(state.pool()).get_datos(&id).await? else {
        return Ok(respuesta_simple(
            StatusCode::NOT_FOUND,
            "Archivo no encontrado",
        ));
    };

    let es_video = archivo.mime_type.starts_with("video/");
    let range = headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok())
        .filter(|_| es_video);

    if let Some(range) = range {
        let len = archivo.data.len() as u64;
        let Some((inicio, fin)) = parse_range(range, len) else {
            return Ok(rango_insatisfacible(len));
        };

        let inicio_usize = usize::try_from(inicio).unwrap_or(usize::MAX);
        let fin_usize = usize::try_from(fin).unwrap_or(usize::MAX);
        let cuerpo = archivo.data[inicio_usize..=fin_usize].to_vec();

        let response = Response::builder()
            .status(StatusCode::PARTIAL_CONTENT)
            .header(header::CONTENT_TYPE, &archivo.mime_type)
            .header(header::CONTENT_RANGE, format!("bytes {inicio}-{fin}/{len}"))
            .header(header::ACCEPT_RANGES, "bytes")
            .header(header::CONTENT_LENGTH, cuerpo.len())
            .header(header::CACHE_CONTROL, CACHE_CONTROL)
            .body(Body::from(cuerpo))
            .map_err(|e| AppError::Internal(e.to_string()))?;
        return Ok(response);
    }

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &archivo.mime_type)
        .header(header::CONTENT_LENGTH, archivo.data.len())
        .header(header::ACCEPT_RANGES, "bytes")
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", archivo.nombre_original),
        )
        .header(header::CACHE_CONTROL, CACHE_CONTROL)
        .body(Body::from(archivo.data))
        .map_err(|e| AppError::Internal(e.to_string()))
}

fn respuesta_simple(status: StatusCode, texto: &'static str) -> Response<Body> {
    let mut response = Response::new(Body::from(texto));
    *response.status_mut() = status;
    response
}

fn rango_insatisfacible(len: u64) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::RANGE_NOT_SATISFIABLE;
    if let Ok(valor) = format!("bytes */{len}").parse() {
        response
            .headers_mut()
            .insert(header::CONTENT_RANGE, valor);
    }
    response
}

/// Parse a `Range: bytes=a-b` header into inclusive byte offsets.
///
/// An open end (`bytes=a-`) runs to the last byte; an end past the file
/// is clamped. Returns `None` for anything malformed or starting past
/// the end of the file.
fn parse_range(valor: &str, len: u64) -> Option<(u64, u64)> {
    if len == 0 {
        return None;
    }

    let rango = valor.strip_prefix("bytes=")?;
    let (inicio, fin) = rango.split_once('-')?;

    let inicio: u64 = inicio.trim().parse().ok()?;
    let fin: u64 = match fin.trim() {
        "" => len - 1,
        f => f.parse::<u64>().ok()?.min(len - 1),
    };

    if inicio >= len || inicio > fin {
        return None;
    }

    Some((inicio, fin))
}
