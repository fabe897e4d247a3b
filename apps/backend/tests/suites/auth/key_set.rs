//! Key-set retrieval failures surface as 503, not as a token problem.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::test;
use backend::auth::JwksClient;
use backend::config::db::DbKind;
use backend::infra::state::build_state;

use crate::common::assert_envelope;
use crate::support::auth::security;
use crate::support::{bearer, create_test_app};

#[actix_web::test]
async fn unreachable_jwks_endpoint_is_503() {
    // Nothing listens on the discard port.
    let jwks = JwksClient::new("http://127.0.0.1:9/.well-known/jwks.json", Duration::from_secs(60))
        .unwrap();
    let state = build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(security())
        .with_key_provider(Arc::new(jwks))
        .build()
        .await
        .unwrap();
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/drinks-detail")
        .insert_header(bearer(&["get:drinks-detail"]))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_envelope(resp, StatusCode::SERVICE_UNAVAILABLE, "key_set_unavailable").await;
}
