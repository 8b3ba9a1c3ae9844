//! Plan management and quota enforcement.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{
    delete, get, json_body, json_request, login_admin, login_vendedor, multipart_body,
    multipart_request, seed_plan, seed_tienda, send, test_app,
};

fn producto_multipart(nombre: &str, imagenes: usize, con_video: bool) -> Vec<u8> {
    let imagen = [5u8; 16];
    let video = [6u8; 64];
    let mut files: Vec<(&str, &str, &str, &[u8])> = Vec::new();
    let nombres = ["a.png", "b.png", "c.png", "d.png"];
    for nombre_archivo in nombres.into_iter().take(imagenes) {
        files.push(("archivos", nombre_archivo, "image/png", imagen.as_slice()));
    }
    if con_video {
        files.push(("archivos", "demo.mp4", "video/mp4", video.as_slice()));
    }
    multipart_body(
        &[("nombre", nombre), ("precio", "30.00"), ("stock", "5")],
        &files,
    )
}

#[tokio::test]
async fn product_creation_stops_at_the_plan_ceiling() {
    let (app, state) = test_app().await;
    let plan = seed_plan(&state, "Mini", 2, 5, false).await;
    seed_tienda(&state, "tienda-a", "a@tienda.test", &plan.id).await;
    let cookie = login_vendedor(&app, "a@tienda.test").await;

    for nombre in ["Tamales", "Atole"] {
        let (parts, _) = send(
            &app,
            multipart_request(
                Method::POST,
                "/api/vendedor/productos",
                Some(&cookie),
                producto_multipart(nombre, 0, false),
            ),
        )
        .await;
        assert_eq!(parts.status, StatusCode::CREATED);
    }

    let (parts, body) = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/vendedor/productos",
            Some(&cookie),
            producto_multipart("Champurrado", 0, false),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(&body)["error"],
        "Has alcanzado el límite de productos de tu plan (2)"
    );
}

#[tokio::test]
async fn images_past_the_quota_are_dropped_silently() {
    let (app, state) = test_app().await;
    let plan = seed_plan(&state, "Mini", 10, 2, false).await;
    seed_tienda(&state, "tienda-a", "a@tienda.test", &plan.id).await;
    let cookie = login_vendedor(&app, "a@tienda.test").await;

    // Four images uploaded, quota of two: request still succeeds
    let (parts, body) = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/vendedor/productos",
            Some(&cookie),
            producto_multipart("Tamales", 4, false),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::CREATED);

    let archivos = json_body(&body)["archivos"].as_array().unwrap().clone();
    assert_eq!(archivos.len(), 2);
    assert_eq!(archivos[0]["nombre_original"], "a.png");
    assert_eq!(archivos[1]["nombre_original"], "b.png");
}

#[tokio::test]
async fn videos_are_skipped_on_plans_without_video() {
    let (app, state) = test_app().await;
    let plan = seed_plan(&state, "Mini", 10, 5, false).await;
    seed_tienda(&state, "tienda-a", "a@tienda.test", &plan.id).await;
    let cookie = login_vendedor(&app, "a@tienda.test").await;

    let (parts, body) = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/vendedor/productos",
            Some(&cookie),
            producto_multipart("Tamales", 1, true),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::CREATED);

    let archivos = json_body(&body)["archivos"].as_array().unwrap().clone();
    assert_eq!(archivos.len(), 1);
    assert_eq!(archivos[0]["tipo"], "imagen");
}

#[tokio::test]
async fn videos_are_stored_on_plans_with_video() {
    let (app, state) = test_app().await;
    let plan = seed_plan(&state, "Premium", 10, 5, true).await;
    seed_tienda(&state, "tienda-a", "a@tienda.test", &plan.id).await;
    let cookie = login_vendedor(&app, "a@tienda.test").await;

    let (parts, body) = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/vendedor/productos",
            Some(&cookie),
            producto_multipart("Tamales", 1, true),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::CREATED);

    let archivos = json_body(&body)["archivos"].as_array().unwrap().clone();
    assert_eq!(archivos.len(), 2);
    assert!(archivos.iter().any(|a| a["tipo"] == "video"));
}

#[tokio::test]
async fn plan_crud_and_delete_guard() {
    let (app, state) = test_app().await;
    let cookie = login_admin(&app, &state).await;

    // Create
    let (parts, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/admin/planes",
            Some(&cookie),
            &json!({
                "nombre": "Básico",
                "precio_mensual": "149.00",
                "max_productos": 50,
                "max_imagenes_por_producto": 5,
            }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::CREATED);
    let plan = json_body(&body);
    let plan_id = plan["id"].as_str().unwrap().to_owned();
    assert_eq!(plan["permite_videos"], false);
    assert_eq!(plan["activo"], true);

    // Update
    let (parts, body) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/api/admin/planes/{plan_id}"),
            Some(&cookie),
            &json!({
                "nombre": "Básico Plus",
                "precio_mensual": "199.00",
                "permite_videos": true,
                "max_productos": 80,
                "max_imagenes_por_producto": 8,
            }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(json_body(&body)["nombre"], "Básico Plus");

    // A store adopts the plan; deletion is now rejected
    seed_tienda(&state, "tienda-a", "a@tienda.test", &plan_id).await;
    let (parts, body) = send(
        &app,
        delete(&format!("/api/admin/planes/{plan_id}"), Some(&cookie)),
    )
    .await;
    assert_eq!(parts.status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"], "el plan tiene tiendas asignadas");

    // Remove the store and the plan can go
    let (_, body) = send(&app, get("/api/admin/tiendas", Some(&cookie))).await;
    let tienda_id = json_body(&body)[0]["id"].as_str().unwrap().to_owned();
    let (parts, _) = send(
        &app,
        delete(&format!("/api/admin/tiendas/{tienda_id}"), Some(&cookie)),
    )
    .await;
    assert_eq!(parts.status, StatusCode::NO_CONTENT);

    let (parts, _) = send(
        &app,
        delete(&format!("/api/admin/planes/{plan_id}"), Some(&cookie)),
    )
    .await;
    assert_eq!(parts.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn admin_creates_store_with_vendor_in_one_call() {
    let (app, state) = test_app().await;
    let cookie = login_admin(&app, &state).await;
    let plan = seed_plan(&state, "Básico", 50, 5, false).await;

    let (parts, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/admin/tiendas",
            Some(&cookie),
            &json!({
                "nombre": "Café El Niño",
                "categoria_general": "comida",
                "whatsapp": "+52 555 000 1111",
                "plan_id": plan.id,
                "vendedor_nombre": "Nina",
                "vendedor_email": "nina@tienda.test",
                "vendedor_password": "clave-de-nina-1",
            }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::CREATED);
    // Slug derived from the accented name
    assert_eq!(json_body(&body)["slug"], "cafe-el-nino");

    // The co-created vendor can log in right away
    let (parts, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/vendedor/auth",
            None,
            &json!({ "email": "nina@tienda.test", "password": "clave-de-nina-1" }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(json_body(&body)["must_change_password"], true);

    // Duplicate slug is rejected with a message
    let (parts, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/admin/tiendas",
            Some(&cookie),
            &json!({
                "nombre": "Otra",
                "slug": "cafe-el-nino",
                "whatsapp": "+52 555 000 2222",
                "plan_id": plan.id,
                "vendedor_nombre": "Otro",
                "vendedor_email": "otro@tienda.test",
                "vendedor_password": "clave-de-otro-1",
            }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"], "el slug ya existe");
}

#[tokio::test]
async fn admin_update_applies_profile_plan_and_activation_together() {
    let (app, state) = test_app().await;
    let cookie = login_admin(&app, &state).await;
    let basico = seed_plan(&state, "Básico", 50, 5, false).await;
    let premium = seed_plan(&state, "Premium", 100, 8, true).await;
    let tienda = seed_tienda(&state, "tienda-a", "a@tienda.test", &basico.id).await;

    let cambios = json!({
        "nombre": "Tienda Renombrada",
        "categoria_general": "moda",
        "whatsapp": "+52 555 333 4444",
        "plan_id": premium.id.clone(),
        "activa": false,
    });

    let (parts, body) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/api/admin/tiendas/{}", tienda.id),
            Some(&cookie),
            &cambios,
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::OK);
    let actualizada = json_body(&body);
    assert_eq!(actualizada["nombre"], "Tienda Renombrada");
    assert_eq!(actualizada["plan_id"], premium.id);
    assert_eq!(actualizada["activa"], false);

    // Unknown id writes nothing
    let (parts, _) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/admin/tiendas/no-existe",
            Some(&cookie),
            &cambios,
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deactivated_stores_go_dark_publicly() {
    let (app, state) = test_app().await;
    let cookie = login_admin(&app, &state).await;
    let plan = seed_plan(&state, "Básico", 50, 5, false).await;
    let tienda = seed_tienda(&state, "tienda-a", "a@tienda.test", &plan.id).await;

    let (parts, _) = send(&app, get("/api/tienda/tienda-a", None)).await;
    assert_eq!(parts.status, StatusCode::OK);

    let (parts, _) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/api/admin/tiendas/{}", tienda.id),
            Some(&cookie),
            &json!({
                "nombre": tienda.nombre,
                "categoria_general": "comida",
                "whatsapp": tienda.whatsapp,
                "plan_id": plan.id,
                "activa": false,
            }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::OK);

    let (parts, _) = send(&app, get("/api/tienda/tienda-a", None)).await;
    assert_eq!(parts.status, StatusCode::NOT_FOUND);
}
