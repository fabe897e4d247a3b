use actix_web::web;

pub mod drinks;
pub mod health;

pub use drinks::not_found;

/// Registers every route. Callers add the middleware stack and
/// `default_service(web::to(routes::not_found))` on the `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(drinks::configure_routes);
}
