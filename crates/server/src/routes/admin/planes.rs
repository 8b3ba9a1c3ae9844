//! Plan management endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use mercadito_core::Precio;

use crate::db::{NuevoPlan, PlanRepository};
use crate::error::{AppError, Result};
use crate::models::Plan;
use crate::session::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlanPayload {
    pub nombre: String,
    pub precio_mensual: Precio,
    #[serde(default)]
    pub permite_videos: bool,
    pub max_productos: i64,
    pub max_imagenes_por_producto: i64,
    #[serde(default = "default_activo")]
    pub activo: bool,
}

const fn default_activo() -> bool {
    true
}

impl PlanPayload {
    fn validar(&self) -> Result<NuevoPlan> {
        if self.nombre.trim().is_empty() {
            return Err(AppError::BadRequest("El nombre es obligatorio".to_owned()));
        }
        if self.max_productos < 1 || self.max_imagenes_por_producto < 1 {
            return Err(AppError::BadRequest(
                "Los límites del plan deben ser mayores a cero".to_owned(),
            ));
        }

        Ok(NuevoPlan {
            nombre: self.nombre.trim().to_owned(),
            precio_mensual: self.precio_mensual,
            permite_videos: self.permite_videos,
            max_productos: self.max_productos,
            max_imagenes_por_producto: self.max_imagenes_por_producto,
            activo: self.activo,
        })
    }
}

/// `GET /api/admin/planes`
pub async fn list(_session: AdminSession, State(state): State<AppState>) -> Result<Json<Vec<Plan>>> {
    let planes = PlanRepository::new(state.pool()).list().await?;
    Ok(Json(planes))
}

/// `GET /api/admin/planes/{id}`
pub async fn show(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Plan>> {
    let plan = PlanRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Plan no encontrado".to_owned()))?;
    Ok(Json(plan))
}

/// `POST /api/admin/planes`
pub async fn create(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<PlanPayload>,
) -> Result<(StatusCode, Json<Plan>)> {
    let nuevo = payload.validar()?;
    let plan = PlanRepository::new(state.pool()).create(&nuevo).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// `PUT /api/admin/planes/{id}`
pub async fn update(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PlanPayload>,
) -> Result<Json<Plan>> {
    let cambios = payload.validar()?;
    let plan = PlanRepository::new(state.pool()).update(&id, &cambios).await?;
    Ok(Json(plan))
}

/// `DELETE /api/admin/planes/{id}`
///
/// Rejected with 400 while any store still uses the plan.
pub async fn delete(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    PlanRepository::new(state.pool()).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
