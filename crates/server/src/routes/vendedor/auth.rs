//! Vendor session endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;

use mercadito_core::Principal;

use crate::error::Result;
use crate::models::Vendedor;
use crate::services::auth;
use crate::session::{clear_session_cookie, session_cookie, VendedorSession};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordPayload {
    pub password_actual: String,
    pub password_nueva: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordPayload {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordPayload {
    pub token: String,
    pub password: String,
}

/// `POST /api/vendedor/auth`
///
/// The response includes `must_change_password` so the dashboard can
/// force a password change after the admin-provisioned first login.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginPayload>,
) -> Result<(CookieJar, Json<Vendedor>)> {
    let (vendedor, token) =
        auth::login_vendedor(&state, &payload.email, &payload.password).await?;
    let jar = jar.add(session_cookie(Principal::Vendedor, token));
    Ok((jar, Json(vendedor)))
}

/// `DELETE /api/vendedor/auth`
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(clear_session_cookie(Principal::Vendedor));
    (jar, StatusCode::NO_CONTENT)
}

/// `POST /api/vendedor/auth/change-password`
pub async fn change_password(
    session: VendedorSession,
    State(state): State<AppState>,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<Json<serde_json::Value>> {
    auth::change_password(
        &state,
        Principal::Vendedor,
        &session.vendedor_id,
        &payload.password_actual,
        &payload.password_nueva,
    )
    .await?;
    Ok(Json(json!({ "mensaje": "Contraseña actualizada" })))
}

/// `POST /api/vendedor/auth/forgot-password`
///
/// The response never reveals whether the account exists.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<Json<serde_json::Value>> {
    auth::forgot_password(&state, Principal::Vendedor, &payload.email).await?;
    Ok(Json(json!({
        "mensaje": "Si la cuenta existe, se envió un enlace de restablecimiento"
    })))
}

/// `POST /api/vendedor/auth/reset-password`
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<Json<serde_json::Value>> {
    auth::reset_password(&state, &payload.token, &payload.password).await?;
    Ok(Json(json!({ "mensaje": "Contraseña actualizada" })))
}
