//! Authentication utilities library
//!
//! Provides the stateless credential primitives behind the bank service:
//! - Password hashing (Argon2id)
//! - JWT token issuance and validation against an explicit clock
//! - Random identifier candidates for new accounts
//! - Authentication coordination
//!
//! Nothing here holds mutable state; every type can be shared across request
//! tasks behind an `Arc`.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{JwtError, JwtHandler, SigningKey};
//! use chrono::{Duration, Utc};
//!
//! let key = SigningKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let handler = JwtHandler::new(&key, Duration::hours(24));
//!
//! let now = Utc::now();
//! let (token, _claims) = handler.issue("A7ZB12PQ", now).unwrap();
//! assert_eq!(handler.validate(&token, now).unwrap(), "A7ZB12PQ");
//! assert_eq!(
//!     handler.validate(&token, now + Duration::hours(24)),
//!     Err(JwtError::Expired)
//! );
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SigningKey};
//! use chrono::{Duration, Utc};
//!
//! let key = SigningKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&key, Duration::hours(24));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth
//!     .authenticate("A7ZB12PQ", "password123", Some(&hash), Utc::now())
//!     .unwrap();
//! println!("Authorization: {}", result.bearer());
//!
//! // Validate token
//! let subject = auth.validate_token(&result.access_token, Utc::now()).unwrap();
//! assert_eq!(subject, "A7ZB12PQ");
//! ```

pub mod authenticator;
pub mod clock;
pub mod identifiers;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::SystemClock;
pub use identifiers::IdentifierFormat;
pub use identifiers::IdentifierGenerator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SigningKey;
pub use password::PasswordError;
pub use password::PasswordHasher;
