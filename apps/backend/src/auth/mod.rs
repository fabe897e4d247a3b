//! Bearer-token authorization against an external identity provider.
//!
//! Flow: `header` pulls the token out of the `Authorization` value,
//! `validator` resolves the signing key through a `KeyProvider`, verifies the
//! token and its standard claims, and finally checks that the required
//! `Permission` is present in the claim set.

pub mod claims;
pub mod error;
pub mod header;
pub mod keys;
pub mod permission;
pub mod validator;

pub use claims::{Audience, TokenClaims};
pub use error::{AuthError, HeaderFault};
pub use keys::{JwksClient, KeyProvider, KeyProviderError, StaticKeys};
pub use permission::{Permission, RequiredPermission};
pub use validator::TokenValidator;
