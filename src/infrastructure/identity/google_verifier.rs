//! Google ID token verifier.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::identity::{AuthenticatedUser, IdentityVerifier};
use crate::error::AppError;

/// Google's public JWKS endpoint for ID token signatures.
const GOOGLE_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// Issuer values Google uses in ID tokens.
const GOOGLE_ISSUERS: &[&str] = &["https://accounts.google.com", "accounts.google.com"];

/// How long a fetched key set is trusted before refetching.
const KEY_SET_TTL: Duration = Duration::from_secs(3600);

/// Claims consumed from a verified Google ID token.
///
/// Signature, expiry, issuer, and audience are enforced by `jsonwebtoken`;
/// this struct only carries what the claim policy below needs.
#[derive(Debug, Deserialize)]
struct GoogleIdClaims {
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

/// RSA public key components from the JWKS document, indexed by `kid`.
#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    #[serde(default)]
    kid: String,
    #[serde(default)]
    kty: String,
    #[serde(default)]
    n: String,
    #[serde(default)]
    e: String,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

struct CachedKeys {
    keys: HashMap<String, Jwk>,
    fetched_at: Instant,
}

/// Verifies Google ID tokens against the public JWKS endpoint.
///
/// The key set is cached for an hour and refetched on expiry or when a token
/// references an unknown `kid` (key rotation). Constructed once at startup
/// and injected wherever identity is needed; tests swap in a fake
/// [`IdentityVerifier`] instead.
///
/// # Verification policy
///
/// - RS256 signature against a current Google key
/// - Issuer must be one of Google's two issuer forms
/// - Audience must equal the configured OAuth client id
/// - `email_verified` must be true
/// - Owner id = email local part; must be non-empty and free of key/path
///   separator characters
///
/// Every failure surfaces as [`AppError::AuthenticationFailed`].
pub struct GoogleIdentityVerifier {
    client_id: String,
    certs_url: String,
    http: reqwest::Client,
    cached: RwLock<Option<CachedKeys>>,
}

impl GoogleIdentityVerifier {
    /// Creates a verifier for the given OAuth client id.
    pub fn new(client_id: String) -> Self {
        Self {
            client_id,
            certs_url: GOOGLE_CERTS_URL.to_string(),
            http: reqwest::Client::new(),
            cached: RwLock::new(None),
        }
    }

    /// Returns the decoding key for `kid`, refreshing the key set if it is
    /// stale or does not know the kid yet.
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AppError> {
        if let Some(jwk) = self.cached_key(kid).await {
            return rsa_key(&jwk);
        }

        self.refresh_keys().await?;

        let jwk = self.cached_key(kid).await.ok_or_else(|| {
            AppError::authentication_failed("Token signed with an unknown key")
        })?;

        rsa_key(&jwk)
    }

    async fn cached_key(&self, kid: &str) -> Option<Jwk> {
        let cached = self.cached.read().await;
        let cached = cached.as_ref()?;
        if cached.fetched_at.elapsed() >= KEY_SET_TTL {
            return None;
        }
        cached.keys.get(kid).cloned()
    }

    async fn refresh_keys(&self) -> Result<(), AppError> {
        debug!("Refreshing identity provider key set");

        let set: JwkSet = self
            .http
            .get(&self.certs_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(error = %e, "Key set fetch failed");
                AppError::authentication_failed("Could not reach the identity provider")
            })?
            .json()
            .await
            .map_err(|e| {
                warn!(error = %e, "Key set parse failed");
                AppError::authentication_failed("Identity provider returned an invalid key set")
            })?;

        let keys = set
            .keys
            .into_iter()
            .filter(|k| k.kty == "RSA" && !k.kid.is_empty())
            .map(|k| (k.kid.clone(), k))
            .collect();

        let mut cached = self.cached.write().await;
        *cached = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });

        Ok(())
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token)
            .map_err(|e| AppError::authentication_failed(format!("Malformed token: {e}")))?;
        let kid = header
            .kid
            .ok_or_else(|| AppError::authentication_failed("Token is missing a key id"))?;

        let key = self.decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(GOOGLE_ISSUERS);
        validation.set_audience(&[self.client_id.as_str()]);

        let data = decode::<GoogleIdClaims>(token, &key, &validation)
            .map_err(|e| AppError::authentication_failed(format!("Token rejected: {e}")))?;

        user_from_claims(data.claims)
    }
}

fn rsa_key(jwk: &Jwk) -> Result<DecodingKey, AppError> {
    DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
        .map_err(|e| AppError::authentication_failed(format!("Invalid provider key: {e}")))
}

/// Applies the claim policy to already-signature-verified claims.
///
/// The owner id is the email local part. Ids containing the storage key
/// separator or a path separator would break key injectivity and routing, so
/// they are refused outright.
fn user_from_claims(claims: GoogleIdClaims) -> Result<AuthenticatedUser, AppError> {
    let email = claims
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::authentication_failed("Token carries no email address"))?;

    if !claims.email_verified {
        return Err(AppError::authentication_failed(
            "Email address is not verified",
        ));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| AppError::authentication_failed("Email address is malformed"))?;

    if local.is_empty() || local.contains(':') || local.contains('/') {
        return Err(AppError::authentication_failed(
            "Email address cannot be used as an owner id",
        ));
    }

    Ok(AuthenticatedUser {
        owner_id: local.to_string(),
        email: email.to_string(),
        email_domain: domain.to_string(),
    })
}
