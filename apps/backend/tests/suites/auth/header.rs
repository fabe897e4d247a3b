//! `Authorization` header shape failures, all 401 with a sub-reason code.

use actix_web::http::header::HeaderValue;
use actix_web::http::StatusCode;
use actix_web::test;

use crate::common::assert_envelope;
use crate::support::{create_test_app, mint_token, state_with_db};

async fn detail_with_header(value: Option<HeaderValue>, expected_code: &str) {
    let app = create_test_app(state_with_db().await).await;

    let mut req = test::TestRequest::get().uri("/drinks-detail");
    if let Some(value) = value {
        req = req.insert_header(("Authorization", value));
    }
    let resp = test::call_service(&app, req.to_request()).await;

    assert_envelope(resp, StatusCode::UNAUTHORIZED, expected_code).await;
}

#[actix_web::test]
async fn missing_header() {
    detail_with_header(None, "authorization_header_missing").await;
}

#[actix_web::test]
async fn wrong_scheme() {
    let value = HeaderValue::from_str(&format!("Token {}", mint_token(&[]))).unwrap();
    detail_with_header(Some(value), "no_auth_scheme").await;
}

#[actix_web::test]
async fn scheme_without_token() {
    detail_with_header(Some(HeaderValue::from_static("Bearer")), "token_not_found").await;
}

#[actix_web::test]
async fn extra_parts() {
    detail_with_header(
        Some(HeaderValue::from_static("Bearer abc def")),
        "multiple_header_parts",
    )
    .await;
}

#[actix_web::test]
async fn non_ascii_token() {
    let value = HeaderValue::from_bytes(b"Bearer caf\xe9").unwrap();
    detail_with_header(Some(value), "malformed_bearer_token").await;
}

#[actix_web::test]
async fn lowercase_scheme_is_accepted() {
    let app = create_test_app(state_with_db().await).await;

    let req = test::TestRequest::get()
        .uri("/drinks-detail")
        .insert_header((
            "Authorization",
            format!("bearer {}", mint_token(&["get:drinks-detail"])),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Authorized, then empty store.
    assert_envelope(resp, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}
