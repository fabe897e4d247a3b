//! Claim set carried by identity-provider access tokens.

use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::permission::Permission;

/// `aud` may be a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::One(aud) => aud == audience,
            Audience::Many(auds) => auds.iter().any(|aud| aud == audience),
        }
    }
}

/// Decoded access-token claims. Lives for a single request only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iss: String,
    /// Subject (identity-provider user id)
    #[serde(default)]
    pub sub: String,
    pub aud: Audience,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Issued-at (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// `None` when the token carries no `permissions` claim at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl TokenClaims {
    /// Require `permission` to be granted by this claim set.
    ///
    /// A missing `permissions` claim and an absent entry are both `Unauthorized`.
    pub fn require(&self, permission: Permission) -> Result<(), AuthError> {
        let granted = self
            .permissions
            .as_ref()
            .ok_or(AuthError::Unauthorized)?;

        if granted.iter().any(|p| p == permission.as_str()) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}
