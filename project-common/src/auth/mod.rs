//! Session token issuance and verification.
//!
//! Access and refresh tokens are HS256 JWTs carrying the member id as subject.
//! Each kind is signed with its own secret and has its own lifetime, so a
//! refresh token never verifies as an access token.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    Encode(jsonwebtoken::errors::Error),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// Claims shared by access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (member id)
    pub sub: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration time (Unix seconds)
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds at which the access token stops verifying.
    pub access_token_exp: i64,
}

/// Signing material and lifetimes for one kind of token.
#[derive(Clone)]
pub struct TokenKey {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenKey {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Key for a process that only verifies tokens minted elsewhere.
    pub fn verifier(secret: &str) -> Self {
        Self::new(secret, Duration::zero())
    }

    fn sign(&self, subject: &str, now: DateTime<Utc>) -> Result<(String, i64), TokenError> {
        let exp = (now + self.ttl).timestamp();
        let claims = SessionClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Encode)?;
        Ok((token, exp))
    }

    /// Verify the signature and expiry of `token` at the current time.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        // exp is compared against `now` below with zero leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(TokenError::Invalid)?
            .claims;

        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

/// Mints access/refresh token pairs.
#[derive(Clone)]
pub struct TokenIssuer {
    access: TokenKey,
    refresh: TokenKey,
}

impl TokenIssuer {
    pub fn new(
        access_secret: &str,
        access_ttl: Duration,
        refresh_secret: &str,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access: TokenKey::new(access_secret, access_ttl),
            refresh: TokenKey::new(refresh_secret, refresh_ttl),
        }
    }

    pub fn issue(&self, subject: &str) -> Result<TokenPair, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<TokenPair, TokenError> {
        let (access_token, access_token_exp) = self.access.sign(subject, now)?;
        let (refresh_token, _) = self.refresh.sign(subject, now)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_token_exp,
        })
    }

    pub fn access_key(&self) -> &TokenKey {
        &self.access
    }

    pub fn refresh_key(&self) -> &TokenKey {
        &self.refresh
    }
}
