use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use super::key::SigningKey;

/// JWT token handler for issuing and validating access tokens.
///
/// Tokens use the compact `header.payload.signature` serialization, signed with
/// HS256 (HMAC with SHA-256). Both operations are pure functions of the claims,
/// the supplied `now` and the key, so one handler can be shared by every
/// request without locking.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `key` - Process-wide signing key
    /// * `ttl` - Lifetime of issued tokens
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    pub fn new(key: &SigningKey, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Issue a token for `subject` at `now`.
    ///
    /// # Returns
    /// Signed token string and its claims
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry out of range or token encoding failed
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<(String, Claims), JwtError> {
        let claims = Claims::new(subject, now, self.ttl)?;
        let token = self.encode(&claims)?;
        Ok((token, claims))
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Validate a token at `now` and return its subject.
    ///
    /// # Errors
    /// * `Malformed` - Structure, encoding, algorithm or claims are invalid
    /// * `SignatureInvalid` - MAC does not match header and payload
    /// * `Expired` - `now` is at or past the expiration time
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        self.decode(token, now).map(|claims| claims.sub)
    }

    /// Decode and validate a token at `now`.
    ///
    /// The signature is checked before the payload is trusted. Expiry is
    /// evaluated against the supplied `now` rather than the system clock, with
    /// no leeway.
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// Same as [`JwtHandler::validate`]
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)?.claims;

        let timestamp = now.timestamp();
        if claims.is_issued_after(timestamp) {
            return Err(JwtError::Malformed(
                "token issued after the validation instant".to_string(),
            ));
        }
        if claims.is_expired(timestamp) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}
