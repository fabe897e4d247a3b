//! Token verification and permission checks.

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header};
use tracing::{debug, warn};

use super::claims::TokenClaims;
use super::error::AuthError;
use super::header::extract_bearer_token;
use super::keys::{KeyProvider, KeyProviderError};
use super::permission::Permission;
use crate::state::security_config::SecurityConfig;

/// Verifies bearer tokens issued by the trusted identity provider.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    security: SecurityConfig,
    keys: Arc<dyn KeyProvider>,
}

impl TokenValidator {
    pub fn new(security: SecurityConfig, keys: Arc<dyn KeyProvider>) -> Self {
        Self { security, keys }
    }

    /// Full check for one request: header -> token -> claims -> permission.
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        permission: Permission,
    ) -> Result<TokenClaims, AuthError> {
        let token = extract_bearer_token(authorization)?;
        let claims = self.verify_token(token).await?;
        claims.require(permission)?;
        debug!(sub = %claims.sub, permission = permission.as_str(), "auth.granted");
        Ok(claims)
    }

    /// Verify signature, expiry, issuer and audience; return the claim set.
    pub async fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidKeyId)?;
        let kid = header.kid.as_deref().ok_or(AuthError::InvalidKeyId)?;

        let key = match self.keys.decoding_key(kid).await {
            Ok(Some(key)) => key,
            Ok(None) => return Err(AuthError::InvalidKeyId),
            Err(KeyProviderError::UnusableKey { kid, detail }) => {
                warn!(kid = %kid, detail = %detail, "auth.unusable_key");
                return Err(AuthError::InvalidKeyId);
            }
            Err(e) => {
                warn!(error = %e, "auth.key_set_unavailable");
                return Err(AuthError::KeySetUnavailable);
            }
        };

        decode::<TokenClaims>(token, &key, &self.security.validation())
            .map(|data| data.claims)
            .map_err(|e| classify_decode_error(e.kind()))
    }
}

fn classify_decode_error(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject
        | ErrorKind::ImmatureSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::MissingAlgorithm
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
        ErrorKind::InvalidEcdsaKey | ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidKeyFormat => {
            AuthError::InvalidKeyId
        }
        _ => AuthError::InvalidHeader,
    }
}
