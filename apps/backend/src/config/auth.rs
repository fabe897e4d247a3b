use std::env;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use super::must_var;
use crate::auth::keys::JwksClient;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Identity-provider settings: `AUTH0_DOMAIN`, `API_AUDIENCE`,
/// `AUTH_ALGORITHMS` (comma list, default RS256), `JWKS_CACHE_TTL_SECS`.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub domain: String,
    pub audience: String,
    pub algorithms: Vec<Algorithm>,
    pub jwks_ttl: Duration,
}

impl AuthSettings {
    pub fn from_env() -> Result<Self, AppError> {
        let domain = must_var("AUTH0_DOMAIN")?;
        let audience = must_var("API_AUDIENCE")?;
        let algorithms = match env::var("AUTH_ALGORITHMS") {
            Ok(raw) if !raw.trim().is_empty() => parse_algorithms(&raw)?,
            _ => vec![Algorithm::RS256],
        };
        let jwks_ttl = match env::var("JWKS_CACHE_TTL_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                AppError::config(format!("JWKS_CACHE_TTL_SECS must be an integer, got '{raw}'"))
            })?,
            Err(_) => JwksClient::DEFAULT_TTL,
        };

        Ok(Self {
            domain: domain.trim().trim_end_matches('/').to_string(),
            audience,
            algorithms,
            jwks_ttl,
        })
    }

    pub fn security_config(&self) -> SecurityConfig {
        SecurityConfig::for_domain(&self.domain, self.audience.clone())
            .with_algorithms(self.algorithms.clone())
    }

    pub fn jwks_client(&self) -> Result<JwksClient, AppError> {
        JwksClient::for_domain(&self.domain, self.jwks_ttl)
            .map_err(|e| AppError::config(format!("failed to build JWKS client: {e}")))
    }
}

fn parse_algorithms(raw: &str) -> Result<Vec<Algorithm>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Algorithm::from_str(s)
                .map_err(|_| AppError::config(format!("Unsupported signing algorithm '{s}'")))
        })
        .collect()
}
