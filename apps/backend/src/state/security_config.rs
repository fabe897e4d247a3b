use jsonwebtoken::{Algorithm, Validation};

/// Token verification settings for the trusted issuer.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Expected `iss` claim (e.g. `https://tenant.auth0.com/`)
    pub issuer: String,
    /// Expected `aud` claim (API identifier)
    pub audience: String,
    /// Accepted signing algorithms (defaults to RS256)
    pub algorithms: Vec<Algorithm>,
    /// Clock skew tolerance for `exp`/`nbf`, in seconds
    pub leeway_secs: u64,
}

impl SecurityConfig {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            algorithms: vec![Algorithm::RS256],
            leeway_secs: 60,
        }
    }

    /// Issuer for an Auth0-style tenant domain.
    pub fn for_domain(domain: &str, audience: impl Into<String>) -> Self {
        Self::new(format!("https://{domain}/"), audience)
    }

    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        if !algorithms.is_empty() {
            self.algorithms = algorithms;
        }
        self
    }

    /// Validation pinned to the configured algorithms, issuer and audience.
    /// `exp`, `iss` and `aud` are required claims.
    pub fn validation(&self) -> Validation {
        let primary = self.algorithms.first().copied().unwrap_or(Algorithm::RS256);
        let mut validation = Validation::new(primary);
        validation.algorithms = self.algorithms.clone();
        validation.leeway = self.leeway_secs;
        validation.validate_exp = true;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation
    }
}
