//! Token codec for issuing and verifying bearer tokens
//!
//! Tokens are stateless HS256 JWTs carrying the subject's user id plus
//! issued-at and expiry timestamps. Nothing is persisted; verification is
//! signature + expiry only, so a token stays valid until natural expiry even
//! if its user disappears (accepted limitation, see DESIGN.md).

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Symmetric signing key, fixed for the lifetime of the deployment.
const SIGNING_KEY: &[u8] = b"dkr3!#mc349x#s3&74f12d";

/// Token lifetime: 12 hours
const TOKEN_TTL_SECS: u64 = 12 * 60 * 60;

/// Single opaque verification failure. Malformed tokens, bad signatures,
/// foreign algorithms and expired tokens are deliberately indistinguishable
/// so callers cannot be used as an oracle.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid token")]
pub struct TokenError;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id the token was issued for
    pub user_id: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Issues and verifies signed, time-bound identity tokens
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new() -> Self {
        Self::with_key(SIGNING_KEY)
    }

    fn with_key(secret: &[u8]) -> Self {
        // HS256 only: a token signed with any other algorithm family fails
        // verification (algorithm-confusion guard).
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        TokenCodec {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token asserting `subject_id` for the next 12 hours
    pub fn issue(&self, subject_id: &str) -> Result<String, TokenError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TokenError)?
            .as_secs();

        let claims = Claims {
            user_id: subject_id.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError)
    }

    /// Verify signature, algorithm family and expiry; return the subject id
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.user_id)
            .map_err(|_| TokenError)
    }
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new()
    }
}
