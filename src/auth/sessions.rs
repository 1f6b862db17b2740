//! Session Tokens
//!
//! Issues and verifies the signed bearer tokens that carry a session.
//! Tokens are stateless HS256 JWTs holding the subject email and an
//! absolute expiry; nothing is stored server-side, so possession of an
//! unexpired token is the whole credential.
//!
//! Verification is deliberately not fallible in the `Result` sense:
//! anything that does not check out, whether expired, tampered with, or
//! plain garbage, comes back as `None` and the caller treats it as
//! unauthenticated. Only issuance can error, since a signing failure is
//! a server fault.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email, the primary identity key.
    pub sub: String,
    /// Token id, unique per issuance.
    pub jti: Uuid,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Absolute expiry, seconds since the Unix epoch.
    pub exp: i64,
}

struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

/// Issues and verifies session tokens. Keys are derived once from the
/// signing secret at startup; the service is cheap to clone and share.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<TokenKeys>,
}

impl TokenService {
    /// Build a token service from the signing secret and session TTL.
    pub fn new(secret: &[u8], ttl_minutes: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Exact expiry. The default leeway would keep tokens alive past
        // their recorded exp.
        validation.leeway = 0;

        Self {
            keys: Arc::new(TokenKeys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation,
                ttl: Duration::minutes(ttl_minutes),
            }),
        }
    }

    /// Issue a signed token for an identity.
    ///
    /// The expiry is fixed at issuance and never slides; a session ends
    /// at `iat + ttl` no matter how active it is.
    pub fn issue(&self, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + self.keys.ttl).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)?;
        Ok(token)
    }

    /// Verify a presented token.
    ///
    /// # Returns
    ///
    /// The claims when signature and expiry both check out, otherwise
    /// `None`. The rejection reason is logged at debug level and never
    /// exposed to the caller.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.keys.decoding, &self.keys.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!("Rejected session token: {:?}", e.kind());
                None
            }
        }
    }
}
