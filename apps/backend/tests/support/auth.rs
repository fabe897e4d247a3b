//! Token minting for integration tests.
//!
//! Tokens are HS256-signed with a fixed octet key served by `StaticKeys`, so
//! the full verification path (kid lookup, signature, iss/aud/exp, permission)
//! runs without network access.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use backend::auth::{KeyProvider, StaticKeys};
use backend::SecurityConfig;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

pub const KID: &str = "it-key";
pub const SECRET: &[u8] = b"integration-secret-integration-secret";
pub const ISSUER: &str = "https://coffee-shop.test/";
pub const AUDIENCE: &str = "drinks";

pub fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

pub fn security() -> SecurityConfig {
    SecurityConfig::new(ISSUER, AUDIENCE).with_algorithms(vec![Algorithm::HS256])
}

pub fn keys() -> Arc<dyn KeyProvider> {
    Arc::new(StaticKeys::hmac(KID, SECRET).unwrap())
}

/// Default claim set for a barista holding `permissions`.
pub fn claims(permissions: &[&str]) -> Value {
    json!({
        "iss": ISSUER,
        "sub": "auth0|barista",
        "aud": AUDIENCE,
        "iat": now(),
        "exp": now() + 3600,
        "permissions": permissions,
    })
}

pub fn sign(claims: &Value) -> String {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(KID.to_string());
    encode(&header, claims, &EncodingKey::from_secret(SECRET)).unwrap()
}

pub fn mint_token(permissions: &[&str]) -> String {
    sign(&claims(permissions))
}

/// `("Authorization", "Bearer <token>")` for `TestRequest::insert_header`.
pub fn bearer(permissions: &[&str]) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", mint_token(permissions)))
}

/// Every permission the API checks.
pub const ALL: [&str; 4] = [
    "get:drinks-detail",
    "post:drinks",
    "patch:drinks",
    "delete:drinks",
];
