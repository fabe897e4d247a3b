use std::env;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;

const ALLOWED_METHODS: [&str; 6] = ["GET", "POST", "PATCH", "DELETE", "OPTIONS", "PUT"];

/// Origins from `CORS_ALLOWED_ORIGINS` (comma-separated), ignoring empty,
/// `null` and non-http entries.
fn configured_origins() -> Vec<String> {
    env::var("CORS_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}

/// Cross-origin policy: any origin unless `CORS_ALLOWED_ORIGINS` narrows it.
pub fn cors_middleware() -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(ALLOWED_METHODS)
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .max_age(3600);

    let origins = configured_origins();
    if origins.is_empty() {
        cors = cors.allow_any_origin();
    } else {
        for origin in &origins {
            cors = cors.allowed_origin(origin);
        }
    }
    cors
}

/// Allow-headers/methods advertised on every response, including requests
/// without an `Origin` header.
pub fn cors_default_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "Content-Type, Authorization, true",
        ))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS.join(",")))
}
