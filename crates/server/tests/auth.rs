//! Session and password flows.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{
    delete, get, json_body, json_request, login_admin, send, session_cookie, test_app,
    tienda_con_sesion, ADMIN_EMAIL, ADMIN_PASSWORD, TEST_PASSWORD,
};
use mercadito_server::services::auth::ensure_bootstrap_admin;

#[tokio::test]
async fn bootstrap_admin_is_idempotent() {
    let (app, state) = test_app().await;

    ensure_bootstrap_admin(&state).await.unwrap();
    ensure_bootstrap_admin(&state).await.unwrap();

    let (parts, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/admin/auth",
            None,
            &json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::OK);
}

#[tokio::test]
async fn login_failure_is_generic() {
    let (app, state) = test_app().await;
    ensure_bootstrap_admin(&state).await.unwrap();

    // Wrong password for an existing account
    let (parts, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/admin/auth",
            None,
            &json!({ "email": ADMIN_EMAIL, "password": "incorrecta-123" }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::UNAUTHORIZED);
    let mensaje_existente = json_body(&body);

    // Unknown account
    let (parts, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/admin/auth",
            None,
            &json!({ "email": "nadie@mercadito.test", "password": "incorrecta-123" }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::UNAUTHORIZED);

    // Same body either way; no user-vs-password signal
    assert_eq!(mensaje_existente, json_body(&body));
    assert_eq!(mensaje_existente["error"], "Credenciales inválidas");
}

#[tokio::test]
async fn admin_endpoints_require_admin_cookie() {
    let (app, state) = test_app().await;

    // No cookie at all
    let (parts, body) = send(&app, get("/api/admin/planes", None)).await;
    assert_eq!(parts.status, StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(&body)["error"], "No autorizado");

    // A vendor cookie is not an admin cookie
    let (_, cookie) = tienda_con_sesion(&app, &state, "tacos-dona-mary", "mary@tienda.test").await;
    let (parts, _) = send(&app, get("/api/admin/planes", Some(&cookie))).await;
    assert_eq!(parts.status, StatusCode::UNAUTHORIZED);

    // And the real admin cookie works
    let admin_cookie = login_admin(&app, &state).await;
    let (parts, _) = send(&app, get("/api/admin/planes", Some(&admin_cookie))).await;
    assert_eq!(parts.status, StatusCode::OK);
}

#[tokio::test]
async fn vendedor_endpoints_reject_admin_cookie() {
    let (app, state) = test_app().await;
    let admin_cookie = login_admin(&app, &state).await;

    let (parts, _) = send(&app, get("/api/vendedor/productos", Some(&admin_cookie))).await;
    assert_eq!(parts.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_uses_separate_cookies_per_kind() {
    let (app, state) = test_app().await;

    let (_, vendedor_cookie) =
        tienda_con_sesion(&app, &state, "tacos-dona-mary", "mary@tienda.test").await;
    assert!(vendedor_cookie.starts_with("mercadito_vendedor="));

    let admin_cookie = login_admin(&app, &state).await;
    assert!(admin_cookie.starts_with("mercadito_admin="));
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let (app, state) = test_app().await;
    let (_, cookie) = tienda_con_sesion(&app, &state, "tacos", "mary@tienda.test").await;

    let (parts, _) = send(&app, delete("/api/vendedor/auth", Some(&cookie))).await;
    assert_eq!(parts.status, StatusCode::NO_CONTENT);

    let limpiada = session_cookie(&parts);
    assert_eq!(limpiada, "mercadito_vendedor=");
}

#[tokio::test]
async fn forgot_password_does_not_reveal_accounts() {
    let (app, state) = test_app().await;
    let _ = tienda_con_sesion(&app, &state, "tacos", "mary@tienda.test").await;
    ensure_bootstrap_admin(&state).await.unwrap();

    for uri in [
        "/api/vendedor/auth/forgot-password",
        "/api/admin/auth/forgot-password",
    ] {
        let (parts_existente, body_existente) = send(
            &app,
            json_request(Method::POST, uri, None, &json!({ "email": "mary@tienda.test" })),
        )
        .await;
        let (parts_ajeno, body_ajeno) = send(
            &app,
            json_request(
                Method::POST,
                uri,
                None,
                &json!({ "email": "fantasma@tienda.test" }),
            ),
        )
        .await;

        assert_eq!(parts_existente.status, StatusCode::OK);
        assert_eq!(parts_ajeno.status, StatusCode::OK);
        assert_eq!(json_body(&body_existente), json_body(&body_ajeno));
    }
}

#[tokio::test]
async fn reset_password_with_unknown_token_fails() {
    let (app, _state) = test_app().await;

    let (parts, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/vendedor/auth/reset-password",
            None,
            &json!({ "token": "token-inventado", "password": "nueva-clave-123" }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"], "Token inválido o expirado");
}

#[tokio::test]
async fn change_password_requires_current_password() {
    let (app, state) = test_app().await;
    let (_, cookie) = tienda_con_sesion(&app, &state, "tacos", "mary@tienda.test").await;

    // Wrong current password
    let (parts, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/vendedor/auth/change-password",
            Some(&cookie),
            &json!({ "password_actual": "equivocada-123", "password_nueva": "nueva-clave-123" }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::UNAUTHORIZED);

    // Too-short replacement
    let (parts, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/vendedor/auth/change-password",
            Some(&cookie),
            &json!({ "password_actual": TEST_PASSWORD, "password_nueva": "corta" }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::BAD_REQUEST);

    // Valid change
    let (parts, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/vendedor/auth/change-password",
            Some(&cookie),
            &json!({ "password_actual": TEST_PASSWORD, "password_nueva": "nueva-clave-123" }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::OK);

    // Old password is dead, new one works
    let (parts, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/vendedor/auth",
            None,
            &json!({ "email": "mary@tienda.test", "password": TEST_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::UNAUTHORIZED);

    let (parts, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/vendedor/auth",
            None,
            &json!({ "email": "mary@tienda.test", "password": "nueva-clave-123" }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::OK);
}
