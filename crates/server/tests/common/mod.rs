//! Shared helpers for the HTTP integration tests.
//!
//! Each test builds the full router against a fresh in-memory SQLite
//! database and drives it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::str::FromStr;

use axum::body::Body;
use axum::http::response::Parts;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use secrecy::SecretString;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;

use mercadito_core::{CategoriaGeneral, Precio};
use mercadito_server::db::{
    NuevaTienda, NuevoPlan, NuevoProducto, PlanRepository, ProductoRepository, TiendaRepository,
};
use mercadito_server::models::{Plan, Producto, Tienda};
use mercadito_server::services::auth::hash_password;
use mercadito_server::{app, AppState, ServerConfig};

pub const TEST_PASSWORD: &str = "secreta-123";
pub const ADMIN_EMAIL: &str = "admin@mercadito.test";
pub const ADMIN_PASSWORD: &str = "clave-admin-123";

pub const BOUNDARY: &str = "mercadito-test-boundary";

/// One pinned connection: each in-memory SQLite database is private to
/// its connection, so a larger pool would see empty databases.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: "sqlite::memory:".to_owned(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_owned(),
        session_secret: SecretString::from("clave-de-sesion-para-tests-0123456789"),
        admin_email: ADMIN_EMAIL.to_owned(),
        admin_password: SecretString::from(ADMIN_PASSWORD),
        email: None,
    }
}

pub async fn test_state() -> AppState {
    AppState::new(test_config(), test_pool().await)
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (app(state.clone()), state)
}

/// Fire a request and collect the response.
pub async fn send(app: &Router, req: Request<Body>) -> (Parts, Vec<u8>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes().to_vec();
    (parts, bytes)
}

pub fn json_body(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).unwrap_or(serde_json::Value::Null)
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn delete(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::DELETE).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Build a multipart body: text fields plus `(field, filename, mime, bytes)`
/// file parts.
pub fn multipart_body(
    texts: &[(&str, &str)],
    files: &[(&str, &str, &str, &[u8])],
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in texts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, filename, mime, data) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: {mime}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Vec<u8>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

/// Extract the session cookie pair from a login response.
pub fn session_cookie(parts: &Parts) -> String {
    parts
        .headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("mercadito_"))
        .and_then(|v| v.split(';').next())
        .expect("login response missing session cookie")
        .to_owned()
}

pub async fn seed_plan(
    state: &AppState,
    nombre: &str,
    max_productos: i64,
    max_imagenes_por_producto: i64,
    permite_videos: bool,
) -> Plan {
    PlanRepository::new(state.pool())
        .create(&NuevoPlan {
            nombre: nombre.to_owned(),
            precio_mensual: Precio::from_str("149.00").unwrap(),
            permite_videos,
            max_productos,
            max_imagenes_por_producto,
            activo: true,
        })
        .await
        .unwrap()
}

pub async fn seed_tienda(
    state: &AppState,
    slug: &str,
    vendedor_email: &str,
    plan_id: &str,
) -> Tienda {
    TiendaRepository::new(state.pool())
        .create(&NuevaTienda {
            nombre: format!("Tienda {slug}"),
            slug: slug.to_owned(),
            descripcion: None,
            categoria_general: CategoriaGeneral::Comida,
            whatsapp: "+52 555 111 2233".to_owned(),
            direccion: None,
            latitud: None,
            longitud: None,
            plan_id: plan_id.to_owned(),
            vendedor_nombre: "Vendedor de Prueba".to_owned(),
            vendedor_email: vendedor_email.to_owned(),
            vendedor_password_hash: hash_password(TEST_PASSWORD).unwrap(),
        })
        .await
        .unwrap()
}

pub async fn seed_producto(
    state: &AppState,
    tienda_id: &str,
    nombre: &str,
    precio: &str,
    precio_oferta: Option<&str>,
    stock: i64,
) -> Producto {
    ProductoRepository::new(state.pool())
        .create(
            tienda_id,
            &NuevoProducto {
                nombre: nombre.to_owned(),
                descripcion: None,
                precio: precio.parse().unwrap(),
                precio_oferta: precio_oferta.map(|p| p.parse().unwrap()),
                stock,
                activo: true,
                destacado: false,
                categoria_id: None,
            },
        )
        .await
        .unwrap()
}

/// Seed a plan and store, then log its vendor in; returns the store and
/// the vendor's session cookie.
pub async fn tienda_con_sesion(
    app: &Router,
    state: &AppState,
    slug: &str,
    email: &str,
) -> (Tienda, String) {
    let plan = seed_plan(state, "Básico", 50, 5, false).await;
    let tienda = seed_tienda(state, slug, email, &plan.id).await;
    let cookie = login_vendedor(app, email).await;
    (tienda, cookie)
}

pub async fn login_vendedor(app: &Router, email: &str) -> String {
    let (parts, _) = send(
        app,
        json_request(
            Method::POST,
            "/api/vendedor/auth",
            None,
            &serde_json::json!({ "email": email, "password": TEST_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::OK);
    session_cookie(&parts)
}

/// Bootstrap the admin account and log it in.
pub async fn login_admin(app: &Router, state: &AppState) -> String {
    mercadito_server::services::auth::ensure_bootstrap_admin(state)
        .await
        .unwrap();
    let (parts, _) = send(
        app,
        json_request(
            Method::POST,
            "/api/admin/auth",
            None,
            &serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::OK);
    session_cookie(&parts)
}
