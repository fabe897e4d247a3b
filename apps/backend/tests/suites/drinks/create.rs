use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use crate::common::{assert_envelope, ok_json};
use crate::support::factory::{drink_count, ingredient, insert_drink};
use crate::support::{bearer, create_test_app, state_with_db};

#[actix_web::test]
async fn create_returns_single_element_long_list() {
    let state = state_with_db().await;
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::post()
        .uri("/drinks")
        .insert_header(bearer(&["post:drinks"]))
        .set_json(json!({
            "title": "Latte",
            "recipe": [{"name": "milk", "color": "white", "parts": 3}]
        }))
        .to_request();
    let body = ok_json(test::call_service(&app, req).await).await;

    assert_eq!(body["success"], true);
    let drink = body["drink"].as_array().unwrap();
    assert_eq!(drink.len(), 1);
    assert_eq!(drink[0]["title"], "Latte");
    assert_eq!(drink[0]["recipe"][0]["parts"], 3);
    assert_eq!(drink_count(&state).await, 1);
}

#[actix_web::test]
async fn create_without_fields_stores_nulls() {
    let app = create_test_app(state_with_db().await).await;

    let req = test::TestRequest::post()
        .uri("/drinks")
        .insert_header(bearer(&["post:drinks"]))
        .set_json(json!({}))
        .to_request();
    let body = ok_json(test::call_service(&app, req).await).await;

    assert_eq!(body["drink"][0]["title"], serde_json::Value::Null);
    assert_eq!(body["drink"][0]["recipe"], json!([]));
}

#[actix_web::test]
async fn duplicate_title_is_422() {
    let state = state_with_db().await;
    insert_drink(&state, "Latte", vec![ingredient("milk", "white", 3)]).await;
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::post()
        .uri("/drinks")
        .insert_header(bearer(&["post:drinks"]))
        .set_json(json!({"title": "Latte", "recipe": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let env = assert_envelope(resp, StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE").await;
    assert_eq!(env.message, "unprocessable");
    assert_eq!(drink_count(&state).await, 1);
}

#[actix_web::test]
async fn unparseable_body_is_403() {
    let state = state_with_db().await;
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::post()
        .uri("/drinks")
        .insert_header(bearer(&["post:drinks"]))
        .insert_header(("Content-Type", "application/json"))
        .set_payload(r#"{"title": "Latte", "recipe": [{"name": "milk"}]}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_envelope(resp, StatusCode::FORBIDDEN, "FORBIDDEN").await;
    assert_eq!(drink_count(&state).await, 0);
}

#[actix_web::test]
async fn positional_array_body_is_403() {
    let state = state_with_db().await;
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::post()
        .uri("/drinks")
        .insert_header(bearer(&["post:drinks"]))
        .set_json(json!(["Latte", [{"name": "milk", "color": "white", "parts": 3}]]))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_envelope(resp, StatusCode::FORBIDDEN, "FORBIDDEN").await;
    assert_eq!(drink_count(&state).await, 0);
}
