//! Admin session endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;

use mercadito_core::Principal;

use crate::error::Result;
use crate::models::Admin;
use crate::services::auth;
use crate::session::{clear_session_cookie, session_cookie};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
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

/// `POST /api/admin/auth`
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginPayload>,
) -> Result<(CookieJar, Json<Admin>)> {
    let (admin, token) = auth::login_admin(&state, &payload.email, &payload.password).await?;
    let jar = jar.add(session_cookie(Principal::Admin, token));
    Ok((jar, Json(admin)))
}

/// `DELETE /api/admin/auth`
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(clear_session_cookie(Principal::Admin));
    (jar, StatusCode::NO_CONTENT)
}

/// `POST /api/admin/auth/forgot-password`
///
/// The response never reveals whether the account exists.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<Json<serde_json::Value>> {
    auth::forgot_password(&state, Principal::Admin, &payload.email).await?;
    Ok(Json(json!({
        "mensaje": "Si la cuenta existe, se envió un enlace de restablecimiento"
    })))
}

/// `POST /api/admin/auth/reset-password`
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<Json<serde_json::Value>> {
    auth::reset_password(&state, &payload.token, &payload.password).await?;
    Ok(Json(json!({ "mensaje": "Contraseña actualizada" })))
}
