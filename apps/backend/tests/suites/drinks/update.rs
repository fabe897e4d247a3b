use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use crate::common::{assert_envelope, ok_json};
use crate::support::factory::{drink_count, ingredient, insert_drink};
use crate::support::{bearer, create_test_app, state_with_db};

#[actix_web::test]
async fn recipe_only_update_keeps_title() {
    let state = state_with_db().await;
    let drink = insert_drink(&state, "Americano", vec![ingredient("espresso", "brown", 1)]).await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{}", drink.id))
        .insert_header(bearer(&["patch:drinks"]))
        .set_json(json!({"recipe": [
            {"name": "espresso", "color": "brown", "parts": 1},
            {"name": "water", "color": "blue", "parts": 2}
        ]}))
        .to_request();
    let body = ok_json(test::call_service(&app, req).await).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["updated"], drink.id);
    assert_eq!(body["drinks"][0]["title"], "Americano");
    assert_eq!(body["drinks"][0]["recipe"][1]["name"], "water");
}

#[actix_web::test]
async fn empty_body_changes_nothing_and_returns_current_projection() {
    let state = state_with_db().await;
    let drink = insert_drink(&state, "Ristretto", vec![ingredient("espresso", "brown", 1)]).await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{}", drink.id))
        .insert_header(bearer(&["patch:drinks"]))
        .set_json(json!({}))
        .to_request();
    let body = ok_json(test::call_service(&app, req).await).await;

    assert_eq!(
        body["drinks"],
        json!([{
            "id": drink.id,
            "title": "Ristretto",
            "recipe": [{"name": "espresso", "color": "brown", "parts": 1}]
        }])
    );
}

#[actix_web::test]
async fn title_update_is_visible_in_response() {
    let state = state_with_db().await;
    let drink = insert_drink(&state, "Macchiato", vec![]).await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{}", drink.id))
        .insert_header(bearer(&["patch:drinks"]))
        .set_json(json!({"title": "Latte Macchiato"}))
        .to_request();
    let body = ok_json(test::call_service(&app, req).await).await;

    assert_eq!(body["drinks"][0]["title"], "Latte Macchiato");
}

#[actix_web::test]
async fn missing_id_is_404() {
    let app = create_test_app(state_with_db().await).await;

    let req = test::TestRequest::patch()
        .uri("/drinks/4242")
        .insert_header(bearer(&["patch:drinks"]))
        .set_json(json!({"title": "Ghost"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_envelope(resp, StatusCode::NOT_FOUND, "DRINK_NOT_FOUND").await;
}

#[actix_web::test]
async fn non_integer_id_is_404() {
    let app = create_test_app(state_with_db().await).await;

    let req = test::TestRequest::patch()
        .uri("/drinks/latte")
        .insert_header(bearer(&["patch:drinks"]))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_envelope(resp, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[actix_web::test]
async fn storage_conflict_is_403() {
    let state = state_with_db().await;
    insert_drink(&state, "Latte", vec![]).await;
    let other = insert_drink(&state, "Mocha", vec![]).await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{}", other.id))
        .insert_header(bearer(&["patch:drinks"]))
        .set_json(json!({"title": "Latte"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_envelope(resp, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[actix_web::test]
async fn wrong_field_type_is_403() {
    let state = state_with_db().await;
    let drink = insert_drink(&state, "Doppio", vec![]).await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{}", drink.id))
        .insert_header(bearer(&["patch:drinks"]))
        .set_json(json!({"recipe": "two shots"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_envelope(resp, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[actix_web::test]
async fn positional_array_body_is_403_and_leaves_row_alone() {
    let state = state_with_db().await;
    let drink = insert_drink(&state, "Flat White", vec![ingredient("milk", "white", 2)]).await;
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{}", drink.id))
        .insert_header(bearer(&["patch:drinks"]))
        .set_json(json!(["Renamed", []]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_envelope(resp, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    assert_eq!(drink_count(&state).await, 1);
    let req = test::TestRequest::get().uri("/drinks").to_request();
    let body = ok_json(test::call_service(&app, req).await).await;
    assert_eq!(body["drinks"][0]["title"], "Flat White");
}
