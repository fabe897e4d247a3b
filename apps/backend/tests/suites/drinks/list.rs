use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use crate::common::{assert_envelope, ok_json};
use crate::support::factory::{ingredient, insert_drink};
use crate::support::{bearer, create_test_app, state_with_db};

#[actix_web::test]
async fn list_with_no_rows_is_404_not_empty_200() {
    let app = create_test_app(state_with_db().await).await;

    let req = test::TestRequest::get().uri("/drinks").to_request();
    let resp = test::call_service(&app, req).await;

    assert_envelope(resp, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[actix_web::test]
async fn list_is_public_and_redacts_parts() {
    let state = state_with_db().await;
    let drink = insert_drink(
        &state,
        "Flat White",
        vec![ingredient("espresso", "brown", 1), ingredient("milk", "white", 2)],
    )
    .await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/drinks").to_request();
    let body = ok_json(test::call_service(&app, req).await).await;

    assert_eq!(
        body,
        json!({
            "success": true,
            "drinks": [{
                "id": drink.id,
                "title": "Flat White",
                "recipe": [
                    {"name": "espresso", "color": "brown"},
                    {"name": "milk", "color": "white"}
                ]
            }]
        })
    );
}

#[actix_web::test]
async fn detail_with_no_rows_is_404() {
    let app = create_test_app(state_with_db().await).await;

    let req = test::TestRequest::get()
        .uri("/drinks-detail")
        .insert_header(bearer(&["get:drinks-detail"]))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_envelope(resp, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[actix_web::test]
async fn detail_returns_long_projection_in_id_order() {
    let state = state_with_db().await;
    let first = insert_drink(&state, "Cortado", vec![ingredient("espresso", "brown", 1)]).await;
    let second = insert_drink(&state, "Mocha", vec![ingredient("chocolate", "dark", 2)]).await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/drinks-detail")
        .insert_header(bearer(&["get:drinks-detail"]))
        .to_request();
    let body = ok_json(test::call_service(&app, req).await).await;

    let drinks = body["drinks"].as_array().unwrap();
    assert_eq!(drinks.len(), 2);
    assert_eq!(drinks[0]["id"], first.id);
    assert_eq!(drinks[1]["id"], second.id);
    assert_eq!(drinks[1]["recipe"][0]["parts"], 2);
}
