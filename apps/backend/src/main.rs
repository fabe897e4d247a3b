use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use backend::auth::KeyProvider;
use backend::config::auth::AuthSettings;
use backend::config::db::DbKind;
use backend::config::server::ServerSettings;
use backend::infra::state::build_state;
use backend::middleware::{cors_default_headers, cors_middleware, RequestTrace, StructuredLogger};
use backend::routes;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let server = match ServerSettings::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let auth = match AuthSettings::from_env() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let db_kind = match DbKind::from_env() {
        Ok(k) => k,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let jwks = match auth.jwks_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        issuer = %auth.security_config().issuer,
        audience = %auth.audience,
        jwks = %jwks.url(),
        db = ?db_kind,
        "starting drinks backend"
    );

    let app_state = match build_state()
        .with_db(db_kind)
        .with_security(auth.security_config())
        .with_key_provider(Arc::new(jwks) as Arc<dyn KeyProvider>)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!("🚀 Drinks backend listening on http://{}:{}", server.host, server.port);

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .wrap(cors_default_headers())
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
