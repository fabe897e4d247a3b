use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// JSON logs by default; `LOG_FORMAT=pretty` for human-readable local output.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,actix_web=info,sqlx=warn,sea_orm=warn,reqwest=warn,hyper=warn")
    });

    let pretty = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("pretty"));
    let registry = tracing_subscriber::registry().with(env_filter);

    if pretty {
        registry.with(fmt::layer().with_target(false)).init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_ansi(false)
                    .json()
                    .with_current_span(true),
            )
            .init();
    }
}
