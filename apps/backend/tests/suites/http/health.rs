use actix_web::test;

use crate::common::ok_json;
use crate::support::{create_test_app, state_with_db, state_without_db};

#[actix_web::test]
async fn health_reports_migrated_db() {
    let app = create_test_app(state_with_db().await).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = ok_json(test::call_service(&app, req).await).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    assert_ne!(body["migrations"], "no_migrations");
}

#[actix_web::test]
async fn health_without_db_is_still_200() {
    let app = create_test_app(state_without_db().await).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = ok_json(test::call_service(&app, req).await).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert!(body["db_error"].is_string());
}
