//! Trusted signing keys, looked up by the `kid` in a token header.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::DecodingKey;
use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Error)]
pub enum KeyProviderError {
    #[error("failed to fetch key set: {0}")]
    Fetch(String),
    #[error("key set could not be parsed: {0}")]
    Parse(String),
    #[error("key '{kid}' is not usable for verification: {detail}")]
    UnusableKey { kid: String, detail: String },
}

/// Source of decoding keys for the trusted issuer.
#[async_trait]
pub trait KeyProvider: Send + Sync + fmt::Debug {
    /// `Ok(None)` means the key set has no key with this id.
    async fn decoding_key(&self, kid: &str) -> Result<Option<DecodingKey>, KeyProviderError>;
}

fn key_from_set(set: &JwkSet, kid: &str) -> Result<Option<DecodingKey>, KeyProviderError> {
    let Some(jwk) = set.find(kid) else {
        return Ok(None);
    };
    DecodingKey::from_jwk(jwk)
        .map(Some)
        .map_err(|e| KeyProviderError::UnusableKey {
            kid: kid.to_string(),
            detail: e.to_string(),
        })
}

/// Fixed, in-memory key set.
#[derive(Debug, Clone)]
pub struct StaticKeys {
    set: JwkSet,
}

impl StaticKeys {
    pub fn new(set: JwkSet) -> Self {
        Self { set }
    }

    /// A provider that knows no keys; every token fails key lookup.
    pub fn empty() -> Self {
        Self::new(JwkSet { keys: Vec::new() })
    }

    pub fn from_json(json: &str) -> Result<Self, KeyProviderError> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|e| KeyProviderError::Parse(e.to_string()))
    }

    /// Single HS256 octet key; handy for local development and tests.
    pub fn hmac(kid: &str, secret: &[u8]) -> Result<Self, KeyProviderError> {
        let jwks = serde_json::json!({
            "keys": [{
                "kty": "oct",
                "kid": kid,
                "alg": "HS256",
                "k": URL_SAFE_NO_PAD.encode(secret),
            }]
        });
        serde_json::from_value(jwks)
            .map(Self::new)
            .map_err(|e| KeyProviderError::Parse(e.to_string()))
    }
}

#[async_trait]
impl KeyProvider for StaticKeys {
    async fn decoding_key(&self, kid: &str) -> Result<Option<DecodingKey>, KeyProviderError> {
        key_from_set(&self.set, kid)
    }
}

#[derive(Debug)]
struct CachedKeySet {
    keys: JwkSet,
    fetched_at: Instant,
}

/// Remote JWKS endpoint with a process-wide TTL cache.
///
/// An unknown `kid` forces one refetch (key rotation), but never more often
/// than `min_refresh_interval`.
#[derive(Clone)]
pub struct JwksClient {
    url: String,
    http: reqwest::Client,
    cache: Cache<(), Arc<CachedKeySet>>,
    min_refresh_interval: Duration,
}

impl fmt::Debug for JwksClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwksClient")
            .field("url", &self.url)
            .field("min_refresh_interval", &self.min_refresh_interval)
            .finish_non_exhaustive()
    }
}

impl JwksClient {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(600);
    const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
    const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

    pub fn new(url: impl Into<String>, ttl: Duration) -> Result<Self, KeyProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Self::FETCH_TIMEOUT)
            .build()
            .map_err(|e| KeyProviderError::Fetch(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            http,
            cache: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            min_refresh_interval: Self::MIN_REFRESH_INTERVAL,
        })
    }

    /// JWKS location for an Auth0-style tenant domain.
    pub fn for_domain(domain: &str, ttl: Duration) -> Result<Self, KeyProviderError> {
        Self::new(format!("https://{domain}/.well-known/jwks.json"), ttl)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Arc<CachedKeySet>, KeyProviderError> {
        debug!(url = %self.url, "jwks.fetch");
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| KeyProviderError::Fetch(e.to_string()))?;

        let keys = response
            .json::<JwkSet>()
            .await
            .map_err(|e| KeyProviderError::Parse(e.to_string()))?;

        info!(url = %self.url, keys = keys.keys.len(), "jwks.refreshed");
        Ok(Arc::new(CachedKeySet {
            keys,
            fetched_at: Instant::now(),
        }))
    }

    async fn key_set(&self) -> Result<Arc<CachedKeySet>, KeyProviderError> {
        self.cache
            .try_get_with((), self.fetch())
            .await
            .map_err(|e| (*e).clone())
    }
}

#[async_trait]
impl KeyProvider for JwksClient {
    async fn decoding_key(&self, kid: &str) -> Result<Option<DecodingKey>, KeyProviderError> {
        let cached = self.key_set().await?;
        if let Some(key) = key_from_set(&cached.keys, kid)? {
            return Ok(Some(key));
        }

        if cached.fetched_at.elapsed() < self.min_refresh_interval {
            return Ok(None);
        }

        warn!(kid, "jwks.unknown_kid_refresh");
        self.cache.invalidate(&()).await;
        let refreshed = self.key_set().await?;
        key_from_set(&refreshed.keys, kid)
    }
}
