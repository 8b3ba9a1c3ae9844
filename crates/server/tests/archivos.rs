//! Stored file serving, including byte ranges for video.

mod common;

use axum::http::{header, Method, StatusCode};

use common::{get, multipart_body, multipart_request, send, test_app, tienda_con_sesion};
use mercadito_core::TipoArchivo;
use mercadito_server::db::{ArchivoRepository, NuevoArchivo};
use mercadito_server::models::Tienda;
use mercadito_server::AppState;

async fn seed_video(state: &AppState, tienda: &Tienda, bytes: Vec<u8>) -> String {
    ArchivoRepository::new(state.pool())
        .create(
            &tienda.id,
            NuevoArchivo {
                tipo: TipoArchivo::Video,
                nombre_original: "demo.mp4".to_owned(),
                mime_type: "video/mp4".to_owned(),
                data: bytes,
                producto_id: None,
                es_logo: false,
                es_banner: false,
            },
        )
        .await
        .unwrap()
        .id
}

fn rango(uri: &str, valor: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::RANGE, valor)
        .body(axum::body::Body::empty())
        .unwrap()
}

#[tokio::test]
async fn video_range_request_returns_the_slice() {
    let (app, state) = test_app().await;
    let (tienda, _) = tienda_con_sesion(&app, &state, "tienda-a", "a@tienda.test").await;

    let datos: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();
    let id = seed_video(&state, &tienda, datos.clone()).await;

    let uri = format!("/api/archivos/{id}");
    let (parts, body) = send(&app, rango(&uri, "bytes=100-199")).await;

    assert_eq!(parts.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(
        parts.headers.get(header::CONTENT_RANGE).unwrap(),
        "bytes 100-199/1000"
    );
    assert_eq!(parts.headers.get(header::CONTENT_LENGTH).unwrap(), "100");
    assert_eq!(parts.headers.get(header::ACCEPT_RANGES).unwrap(), "bytes");
    assert_eq!(body, datos[100..200].to_vec());
}

#[tokio::test]
async fn open_ended_range_runs_to_the_last_byte() {
    let (app, state) = test_app().await;
    let (tienda, _) = tienda_con_sesion(&app, &state, "tienda-a", "a@tienda.test").await;

    let datos: Vec<u8> = vec![7; 1000];
    let id = seed_video(&state, &tienda, datos).await;

    let uri = format!("/api/archivos/{id}");
    let (parts, body) = send(&app, rango(&uri, "bytes=950-")).await;

    assert_eq!(parts.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(
        parts.headers.get(header::CONTENT_RANGE).unwrap(),
        "bytes 950-999/1000"
    );
    assert_eq!(body.len(), 50);
}

#[tokio::test]
async fn unsatisfiable_range_is_416() {
    let (app, state) = test_app().await;
    let (tienda, _) = tienda_con_sesion(&app, &state, "tienda-a", "a@tienda.test").await;
    let id = seed_video(&state, &tienda, vec![0; 1000]).await;

    let uri = format!("/api/archivos/{id}");
    for valor in ["bytes=1000-", "bytes=xyz-abc", "bytes=200-100"] {
        let (parts, _) = send(&app, rango(&uri, valor)).await;
        assert_eq!(parts.status, StatusCode::RANGE_NOT_SATISFIABLE, "{valor}");
    }
}

#[tokio::test]
async fn full_requests_and_images_ignore_range() {
    let (app, state) = test_app().await;
    let (tienda, cookie) = tienda_con_sesion(&app, &state, "tienda-a", "a@tienda.test").await;

    // Video without a Range header: full body
    let video_id = seed_video(&state, &tienda, vec![3; 500]).await;
    let (parts, body) = send(&app, get(&format!("/api/archivos/{video_id}"), None)).await;
    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(body.len(), 500);
    assert_eq!(
        parts.headers.get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=86400"
    );
    assert_eq!(parts.headers.get(header::ACCEPT_RANGES).unwrap(), "bytes");

    // Images serve whole even when the client sends Range
    let cuerpo = multipart_body(
        &[("tipo", "logo")],
        &[("archivo", "logo.png", "image/png", &[9u8; 64])],
    );
    let (parts, body) = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/vendedor/tienda/archivos",
            Some(&cookie),
            cuerpo,
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::CREATED);
    let logo_id = common::json_body(&body)["id"].as_str().unwrap().to_owned();

    let (parts, body) = send(&app, rango(&format!("/api/archivos/{logo_id}"), "bytes=0-9")).await;
    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(body.len(), 64);
    // Images advertise range support too, even though only video honors it
    assert_eq!(parts.headers.get(header::ACCEPT_RANGES).unwrap(), "bytes");
    assert_eq!(
        parts.headers.get(header::CONTENT_DISPOSITION).unwrap(),
        "inline; filename=\"logo.png\""
    );
}

#[tokio::test]
async fn unknown_file_is_404() {
    let (app, _state) = test_app().await;
    let (parts, body) = send(&app, get("/api/archivos/no-existe", None)).await;
    assert_eq!(parts.status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"Archivo no encontrado");
}

#[tokio::test]
async fn new_logo_replaces_the_previous_one() {
    let (app, state) = test_app().await;
    let (_, cookie) = tienda_con_sesion(&app, &state, "tienda-a", "a@tienda.test").await;

    for nombre in ["primero.png", "segundo.png"] {
        let cuerpo = multipart_body(
            &[("tipo", "logo")],
            &[("archivo", nombre, "image/png", &[1u8; 32])],
        );
        let (parts, _) = send(
            &app,
            multipart_request(
                Method::POST,
                "/api/vendedor/tienda/archivos",
                Some(&cookie),
                cuerpo,
            ),
        )
        .await;
        assert_eq!(parts.status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, get("/api/vendedor/tienda", Some(&cookie))).await;
    let archivos = common::json_body(&body)["archivos"].as_array().unwrap().clone();
    assert_eq!(archivos.len(), 1);
    assert_eq!(archivos[0]["nombre_original"], "segundo.png");
}
