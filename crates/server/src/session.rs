//! Cookie sessions backed by signed tokens.
//!
//! Admin and vendor sessions live in separate cookies
//! (`mercadito_admin` and `mercadito_vendedor`), so one browser can hold
//! both at once and logging out of one never touches the other. Tokens
//! are HS256-signed and expire after 24 hours; the cookie itself carries
//! no state beyond the token.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use mercadito_core::Principal;

use crate::error::AppError;
use crate::state::AppState;

/// Session lifetime.
pub const SESSION_TTL_HOURS: i64 = 24;

const ADMIN_COOKIE: &str = "mercadito_admin";
const VENDEDOR_COOKIE: &str = "mercadito_vendedor";

/// Signing and verification keys derived from the session secret.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account ID.
    pub sub: String,
    pub email: String,
    pub tipo: Principal,
    /// The vendor's store; absent for admins.
    pub tienda_id: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// The cookie name for a principal kind.
#[must_use]
pub const fn cookie_name(tipo: Principal) -> &'static str {
    match tipo {
        Principal::Admin => ADMIN_COOKIE,
        Principal::Vendedor => VENDEDOR_COOKIE,
    }
}

/// Sign a session token for an account.
///
/// # Errors
///
/// Returns an error if token encoding fails.
pub fn create_token(
    keys: &SessionKeys,
    sub: &str,
    email: &str,
    tipo: Principal,
    tienda_id: Option<String>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: sub.to_owned(),
        email: email.to_owned(),
        tipo,
        tienda_id,
        iat: now.timestamp(),
        exp: (now + Duration::hours(SESSION_TTL_HOURS)).timestamp(),
    };
    jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &keys.encoding)
}

/// Verify a session token and return its claims.
///
/// # Errors
///
/// Returns an error if the token is malformed, tampered with, or expired.
pub fn verify_token(
    keys: &SessionKeys,
    token: &str,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &keys.decoding,
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Build the session cookie for a freshly signed token.
#[must_use]
pub fn session_cookie(tipo: Principal, token: String) -> Cookie<'static> {
    Cookie::build((cookie_name(tipo), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Build a removal cookie that clears the session for a principal kind.
#[must_use]
pub fn clear_session_cookie(tipo: Principal) -> Cookie<'static> {
    Cookie::build((cookie_name(tipo), ""))
        .path("/")
        .build()
}

fn no_autorizado() -> AppError {
    AppError::Unauthorized("No autorizado".to_owned())
}

/// An authenticated admin session, extracted from the admin cookie.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub admin_id: String,
    pub email: String,
}

impl<S> FromRequestParts<S> for AdminSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(ADMIN_COOKIE).ok_or_else(no_autorizado)?;
        let claims =
            verify_token(state.session_keys(), cookie.value()).map_err(|_| no_autorizado())?;

        if claims.tipo != Principal::Admin {
            return Err(no_autorizado());
        }

        Ok(Self {
            admin_id: claims.sub,
            email: claims.email,
        })
    }
}

/// An authenticated vendor session, extracted from the vendor cookie.
///
/// Carries the vendor's `tienda_id`; handlers scope every query with it.
#[derive(Debug, Clone)]
pub struct VendedorSession {
    pub vendedor_id: String,
    pub email: String,
    pub tienda_id: String,
}

impl<S> FromRequestParts<S> for VendedorSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(VENDEDOR_COOKIE).ok_or_else(no_autorizado)?;
        let claims =
            verify_token(state.session_keys(), cookie.value()).map_err(|_| no_autorizado())?;

        if claims.tipo != Principal::Vendedor {
            return Err(no_autorizado());
        }

        let tienda_id = claims.tienda_id.ok_or_else(no_autorizado)?;

        Ok(Self {
            vendedor_id: claims.sub,
            email: claims.email,
            tienda_id,
        })
    }
}
