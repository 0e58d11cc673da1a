//! Verified caller identity and the verifier boundary.

use crate::error::AppError;
use async_trait::async_trait;

/// Identity extracted from a verified bearer credential.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    /// Stable identifier derived from the email local part; scopes all
    /// storage keys.
    pub owner_id: String,
    pub email: String,
    /// Email domain part, kept for log context.
    pub email_domain: String,
}

/// Authorization context threaded through every registry operation.
///
/// Carrying the verified owner id as an explicit argument (rather than
/// re-deriving it inside each operation) keeps the ownership invariant
/// visible at every call site: a registry method can only touch keys scoped
/// to this owner.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub owner_id: String,
}

impl From<AuthenticatedUser> for AuthContext {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            owner_id: user.owner_id,
        }
    }
}

/// Verifies bearer credentials against the trusted identity provider.
///
/// The cryptographic machinery (signature and key-set validation) lives
/// behind this trait; the rest of the service only ever sees the verified
/// [`AuthenticatedUser`]. Constructed once at startup and injected, so tests
/// substitute a fake.
///
/// # Implementations
///
/// - [`crate::infrastructure::identity::GoogleIdentityVerifier`] - Google ID
///   tokens via the public JWKS endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verifies `token` and returns the caller identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AuthenticationFailed`] for any malformed, expired,
    /// wrong-issuer, wrong-audience, or unverified-email credential.
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AppError>;
}
