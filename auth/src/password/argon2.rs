use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Fixed salt for the decoy computation run when there is no usable stored hash.
const DECOY_SALT: &str = "ZGVjb3lzYWx0ZGVjb3lzYWx0";

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
/// Every verification path costs one full Argon2 computation, whether the
/// stored hash is valid, malformed or missing altogether.
#[derive(Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with Argon2id defaults
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is drawn for every call, so hashing the same
    /// password twice yields two different PHC strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest comparison is constant time. A stored hash that is malformed
    /// or unusable by Argon2 is treated as a mismatch after running the decoy
    /// computation.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed_hash) => parsed_hash,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                return self.verify_missing(password);
            }
        };

        // Without both parts the verifier reports a mismatch before hashing anything.
        if parsed_hash.salt.is_none() || parsed_hash.hash.is_none() {
            tracing::warn!("Stored password hash has no salt or digest");
            return self.verify_missing(password);
        }

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => true,
            Err(PasswordHashError::Password) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is unusable");
                self.verify_missing(password)
            }
        }
    }

    /// Burn the cost of one verification for a credential that does not exist.
    ///
    /// Always returns false.
    pub fn verify_missing(&self, password: &str) -> bool {
        if let Ok(salt) = SaltString::from_b64(DECOY_SALT) {
            let _ = self.argon2.hash_password(password.as_bytes(), &salt);
        }
        false
    }
}
