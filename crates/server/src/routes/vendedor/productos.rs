//! Vendor product endpoints.
//!
//! Create and update are multipart: product fields as text parts plus
//! any number of `archivos` file parts. Plan quotas apply here: the
//! product ceiling rejects the request, while per-product image limits
//! and the video gate silently drop the offending files, keeping the
//! rest of the upload.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use mercadito_core::{Precio, TipoArchivo};

use crate::db::{
    ArchivoRepository, NuevoArchivo, NuevoProducto, PlanRepository, ProductoRepository,
    TiendaRepository,
};
use crate::error::{AppError, Result};
use crate::models::{Archivo, Plan, Producto};
use crate::session::VendedorSession;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProductoDetalle {
    #[serde(flatten)]
    pub producto: Producto,
    pub archivos: Vec<Archivo>,
}

/// A file part lifted out of the multipart stream.
struct ArchivoSubido {
    nombre: String,
    mime: String,
    data: Vec<u8>,
}

/// Product fields parsed from the multipart text parts.
#[derive(Default)]
struct CamposProducto {
    nombre: Option<String>,
    descripcion: Option<String>,
    precio: Option<Precio>,
    precio_oferta: Option<Precio>,
    stock: Option<i64>,
    activo: Option<bool>,
    destacado: Option<bool>,
    categoria_id: Option<String>,
    archivos: Vec<ArchivoSubido>,
}

fn campo_invalido(nombre: &str) -> AppError {
    AppError::BadRequest(format!("Campo inválido: {nombre}"))
}

fn parse_bool(valor: &str) -> bool {
    matches!(valor, "true" | "1" | "on")
}

async fn leer_multipart(mut multipart: Multipart) -> Result<CamposProducto> {
    let mut campos = CamposProducto::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        if name == "archivos" {
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
            campos.archivos.push(ArchivoSubido { nombre, mime, data });
            continue;
        }

        let valor = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        match name.as_str() {
            "nombre" => campos.nombre = Some(valor),
            "descripcion" => {
                campos.descripcion = Some(valor).filter(|v| !v.trim().is_empty());
            }
            "precio" => {
                campos.precio = Some(valor.parse().map_err(|_| campo_invalido("precio"))?);
            }
            "precio_oferta" => {
                if !valor.trim().is_empty() {
                    campos.precio_oferta =
                        Some(valor.parse().map_err(|_| campo_invalido("precio_oferta"))?);
                }
            }
            "stock" => {
                campos.stock = Some(valor.parse().map_err(|_| campo_invalido("stock"))?);
            }
            "activo" => campos.activo = Some(parse_bool(&valor)),
            "destacado" => campos.destacado = Some(parse_bool(&valor)),
            "categoria_id" => {
                campos.categoria_id = Some(valor).filter(|v| !v.trim().is_empty());
            }
            _ => {}
        }
    }

    Ok(campos)
}

impl CamposProducto {
    fn a_nuevo(&self) -> Result<NuevoProducto> {
        let nombre = self
            .nombre
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::BadRequest("El nombre es obligatorio".to_owned()))?;
        let precio = self
            .precio
            .ok_or_else(|| AppError::BadRequest("El precio es obligatorio".to_owned()))?;

        let stock = self.stock.unwrap_or(0);
        if stock < 0 {
            return Err(campo_invalido("stock"));
        }

        Ok(NuevoProducto {
            nombre: nombre.to_owned(),
            descripcion: self.descripcion.clone(),
            precio,
            precio_oferta: self.precio_oferta,
            stock,
            activo: self.activo.unwrap_or(true),
            destacado: self.destacado.unwrap_or(false),
            categoria_id: self.categoria_id.clone(),
        })
    }
}

async fn plan_de_tienda(state: &AppState, tienda_id: &str) -> Result<Plan> {
    let pool = state.pool();
    let tienda = TiendaRepository::new(pool)
        .get(tienda_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tienda no encontrada".to_owned()))?;
    let plan = PlanRepository::new(pool)
        .get(&tienda.plan_id)
        .await?
        .ok_or_else(|| AppError::Internal("tienda sin plan".to_owned()))?;
    Ok(plan)
}

/// Store uploaded files for a product, honoring the plan's quotas.
///
/// Images past `max_imagenes_por_producto` and videos on plans without
/// video support are dropped without failing the request.
async fn guardar_archivos(
    state: &AppState,
    tienda_id: &str,
    plan: &Plan,
    producto_id: &str,
    archivos: Vec<ArchivoSubido>,
) -> Result<()> {
    if archivos.is_empty() {
        return Ok(());
    }

    let repo = ArchivoRepository::new(state.pool());
    let mut imagenes = repo.count_imagenes(tienda_id, producto_id).await?;

    for subido in archivos {
        let tipo = TipoArchivo::from_mime(&subido.mime);

        match tipo {
            TipoArchivo::Video if !plan.permite_videos => {
                tracing::debug!(archivo = %subido.nombre, "Plan sin videos; archivo omitido");
                continue;
            }
            TipoArchivo::Imagen if imagenes >= plan.max_imagenes_por_producto => {
                tracing::debug!(
                    archivo = %subido.nombre,
                    limite = plan.max_imagenes_por_producto,
                    "Límite de imágenes alcanzado; archivo omitido"
                );
                continue;
            }
            _ => {}
        }

        repo.create(
            tienda_id,
            NuevoArchivo {
                tipo,
                nombre_original: subido.nombre,
                mime_type: subido.mime,
                data: subido.data,
                producto_id: Some(producto_id.to_owned()),
                es_logo: false,
                es_banner: false,
            },
        )
        .await?;

        if tipo == TipoArchivo::Imagen {
            imagenes += 1;
        }
    }

    Ok(())
}

async fn detalle(
    state: &AppState,
    tienda_id: &str,
    producto: Producto,
) -> Result<ProductoDetalle> {
    let archivos = ArchivoRepository::new(state.pool())
        .list_by_producto(tienda_id, &producto.id)
        .await?;
    Ok(ProductoDetalle { producto, archivos })
}

/// `GET /api/vendedor/productos`
pub async fn list(
    session: VendedorSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductoDetalle>>> {
    let productos = ProductoRepository::new(state.pool())
        .list(&session.tienda_id)
        .await?;

    let mut detalles = Vec::with_capacity(productos.len());
    for producto in productos {
        detalles.push(detalle(&state, &session.tienda_id, producto).await?);
    }
    Ok(Json(detalles))
}

/// `GET /api/vendedor/productos/{id}`
pub async fn show(
    session: VendedorSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductoDetalle>> {
    let producto = ProductoRepository::new(state.pool())
        .get(&session.tienda_id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Producto no encontrado".to_owned()))?;
    Ok(Json(detalle(&state, &session.tienda_id, producto).await?))
}

/// `POST /api/vendedor/productos`
///
/// Rejected with 400 once the store reaches its plan's product ceiling.
pub async fn create(
    session: VendedorSession,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ProductoDetalle>)> {
    let plan = plan_de_tienda(&state, &session.tienda_id).await?;

    let existentes = ProductoRepository::new(state.pool())
        .count(&session.tienda_id)
        .await?;
    if existentes >= plan.max_productos {
        return Err(AppError::BadRequest(format!(
            "Has alcanzado el límite de productos de tu plan ({})",
            plan.max_productos
        )));
    }

    let campos = leer_multipart(multipart).await?;
    let nuevo = campos.a_nuevo()?;

    let producto = ProductoRepository::new(state.pool())
        .create(&session.tienda_id, &nuevo)
        .await?;

    guardar_archivos(&state, &session.tienda_id, &plan, &producto.id, campos.archivos).await?;

    let detalle = detalle(&state, &session.tienda_id, producto).await?;
    Ok((StatusCode::CREATED, Json(detalle)))
}

/// `PUT /api/vendedor/productos/{id}`
///
/// New `archivos` parts are appended, still subject to the plan quotas.
pub async fn update(
    session: VendedorSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<ProductoDetalle>> {
    let plan = plan_de_tienda(&state, &session.tienda_id).await?;

    let campos = leer_multipart(multipart).await?;
    let cambios = campos.a_nuevo()?;

    let producto = ProductoRepository::new(state.pool())
        .update(&session.tienda_id, &id, &cambios)
        .await?;

    guardar_archivos(&state, &session.tienda_id, &plan, &producto.id, campos.archivos).await?;

    Ok(Json(detalle(&state, &session.tienda_id, producto).await?))
}

/// `DELETE /api/vendedor/productos/{id}`
pub async fn delete(
    session: VendedorSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    ProductoRepository::new(state.pool())
        .delete(&session.tienda_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
