use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use crate::common::{assert_envelope, ok_json};
use crate::support::factory::{drink_count, ingredient, insert_drink};
use crate::support::{bearer, create_test_app, state_with_db};

#[actix_web::test]
async fn delete_removes_row() {
    let state = state_with_db().await;
    let drink = insert_drink(&state, "Affogato", vec![ingredient("gelato", "white", 1)]).await;
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/drinks/{}", drink.id))
        .insert_header(bearer(&["delete:drinks"]))
        .to_request();
    let body = ok_json(test::call_service(&app, req).await).await;

    assert_eq!(
        body,
        json!({"success": true, "status_code": 200, "delete": drink.id})
    );
    assert_eq!(drink_count(&state).await, 0);
}

#[actix_web::test]
async fn deleting_missing_id_twice_is_404_both_times() {
    let state = state_with_db().await;
    insert_drink(&state, "Lungo", vec![]).await;
    let app = create_test_app(state.clone()).await;

    for _ in 0..2 {
        let req = test::TestRequest::delete()
            .uri("/drinks/999")
            .insert_header(bearer(&["delete:drinks"]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_envelope(resp, StatusCode::NOT_FOUND, "DRINK_NOT_FOUND").await;
        assert_eq!(drink_count(&state).await, 1);
    }
}
