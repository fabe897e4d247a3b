//! Process configuration read from the environment at startup.

pub mod auth;
pub mod db;
pub mod server;

/// Get required environment variable or return a configuration error.
pub(crate) fn must_var(name: &str) -> Result<String, crate::error::AppError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            crate::error::AppError::config(format!(
                "Required environment variable '{name}' is not set"
            ))
        })
}
