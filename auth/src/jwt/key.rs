use std::fmt;

use super::errors::JwtError;

/// Process-wide HMAC secret.
///
/// Built once at startup from configuration and handed to the token handler.
/// Never mutated afterwards and never printed.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Minimum secret size for HS256 (256 bits).
    pub const MIN_LENGTH: usize = 32;

    /// Wrap a secret.
    ///
    /// # Errors
    /// * `WeakKey` - Secret shorter than `MIN_LENGTH` bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, JwtError> {
        let secret = secret.into();
        if secret.len() < Self::MIN_LENGTH {
            return Err(JwtError::WeakKey {
                min: Self::MIN_LENGTH,
                actual: secret.len(),
            });
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}
