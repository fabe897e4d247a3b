use actix_web::http::{header, StatusCode};
use actix_web::test;

use crate::support::{create_test_app, state_with_db};

#[actix_web::test]
async fn every_response_advertises_allowed_headers_and_methods() {
    let app = create_test_app(state_with_db().await).await;

    // Error path, no Origin header.
    let req = test::TestRequest::get().uri("/drinks").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let headers = resp.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        "Content-Type, Authorization, true"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
        "GET,POST,PATCH,DELETE,OPTIONS,PUT"
    );
}

#[actix_web::test]
async fn cross_origin_request_is_allowed() {
    let app = create_test_app(state_with_db().await).await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header((header::ORIGIN, "http://localhost:8100"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[actix_web::test]
async fn preflight_for_patch_succeeds() {
    let app = create_test_app(state_with_db().await).await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/drinks/1")
        .insert_header((header::ORIGIN, "http://localhost:8100"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert!(resp
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
