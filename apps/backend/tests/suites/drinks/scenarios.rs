//! End-to-end flows across several endpoints.

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use crate::common::{assert_envelope, ok_json};
use crate::support::auth::ALL;
use crate::support::{bearer, create_test_app, state_with_db};

#[actix_web::test]
async fn water_round_trip_through_detail() {
    let app = create_test_app(state_with_db().await).await;

    let req = test::TestRequest::post()
        .uri("/drinks")
        .insert_header(bearer(&["post:drinks"]))
        .set_json(json!({
            "title": "Water",
            "recipe": [{"name": "water", "color": "blue", "parts": 1}]
        }))
        .to_request();
    ok_json(test::call_service(&app, req).await).await;

    let req = test::TestRequest::get()
        .uri("/drinks-detail")
        .insert_header(bearer(&["get:drinks-detail"]))
        .to_request();
    let body = ok_json(test::call_service(&app, req).await).await;

    let drink = &body["drinks"][0];
    assert_eq!(drink["title"], "Water");
    assert_eq!(drink["recipe"][0]["parts"], 1);
}

#[actix_web::test]
async fn full_lifecycle() {
    let app = create_test_app(state_with_db().await).await;

    let req = test::TestRequest::post()
        .uri("/drinks")
        .insert_header(bearer(&ALL))
        .set_json(json!({
            "title": "Matcha Latte",
            "recipe": [{"name": "matcha", "color": "green", "parts": 1}]
        }))
        .to_request();
    let created = ok_json(test::call_service(&app, req).await).await;
    let id = created["drink"][0]["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/drinks/{id}"))
        .insert_header(bearer(&ALL))
        .set_json(json!({"title": "Iced Matcha"}))
        .to_request();
    let updated = ok_json(test::call_service(&app, req).await).await;
    assert_eq!(updated["drinks"][0]["title"], "Iced Matcha");
    assert_eq!(updated["drinks"][0]["recipe"][0]["name"], "matcha");

    let req = test::TestRequest::get().uri("/drinks").to_request();
    let listed = ok_json(test::call_service(&app, req).await).await;
    assert_eq!(listed["drinks"][0]["title"], "Iced Matcha");
    assert!(listed["drinks"][0]["recipe"][0].get("parts").is_none());

    let req = test::TestRequest::delete()
        .uri(&format!("/drinks/{id}"))
        .insert_header(bearer(&ALL))
        .to_request();
    ok_json(test::call_service(&app, req).await).await;

    let req = test::TestRequest::get().uri("/drinks").to_request();
    let resp = test::call_service(&app, req).await;
    assert_envelope(resp, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}
