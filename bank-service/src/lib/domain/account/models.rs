use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::BalanceError;
use crate::account::errors::EmailError;
use crate::account::errors::NameError;
use crate::account::errors::UserIdError;

/// Login credential of a registered user.
///
/// Created at registration together with its ledger record.
#[derive(Debug, Clone)]
pub struct Credential {
    pub user_id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Account ledger entry owned by a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLedgerRecord {
    pub user_id: UserId,
    pub account_number: AccountNumber,
    pub routing_code: RoutingCode,
    pub pin: Pin,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub balance: Balance,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
///
/// Generated ids are fixed-length uppercase alphanumeric strings. Parsing
/// accepts any short ASCII alphanumeric string so lookups never reach the
/// store with arbitrary input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub const MAX_LENGTH: usize = 64;

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidLength` - Empty or longer than 64 characters
    /// * `InvalidCharacters` - Contains anything but ASCII letters and digits
    pub fn parse(s: &str) -> Result<Self, UserIdError> {
        if s.is_empty() || s.len() > Self::MAX_LENGTH {
            return Err(UserIdError::InvalidLength {
                max: Self::MAX_LENGTH,
                actual: s.len(),
            });
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(UserIdError::InvalidCharacters);
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! identifier_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

identifier_type!(
    /// Account number, `AC` followed by alphanumeric characters.
    AccountNumber
);
identifier_type!(
    /// Branch routing code, `IFSC` followed by alphanumeric characters.
    RoutingCode
);
identifier_type!(
    /// Fixed-width numeric PIN, unique per account.
    Pin
);

/// First or last name of an account holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 100;

    /// Create a validated name (surrounding whitespace is trimmed).
    ///
    /// # Errors
    /// * `Empty` - Nothing left after trimming
    /// * `TooLong` - More than 100 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim();
        let length = name.chars().count();
        if length == 0 {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Addresses are
/// trimmed and lowercased, so two spellings differing only in case are the
/// same address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account balance in minor currency units (cents). Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Balance(i64);

impl Balance {
    pub const ZERO: Balance = Balance(0);

    /// # Errors
    /// * `Negative` - Amount below zero
    pub fn new(minor_units: i64) -> Result<Self, BalanceError> {
        if minor_units < 0 {
            Err(BalanceError::Negative(minor_units))
        } else {
            Ok(Self(minor_units))
        }
    }

    pub fn minor_units(&self) -> i64 {
        self.0
    }
}

/// Command to register a new account with validated fields
#[derive(Debug)]
pub struct RegisterCommand {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    /// Construct a new registration command.
    ///
    /// # Arguments
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: EmailAddress,
        password: String,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password,
        }
    }
}

/// Command to log in.
///
/// The user id stays a raw string: an unparsable id must fail exactly like
/// an unknown one.
#[derive(Debug)]
pub struct LoginCommand {
    pub user_id: String,
    pub password: String,
}

/// Bearer capability returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parse() {
        assert_eq!(UserId::parse("A7ZB12PQ").unwrap().as_str(), "A7ZB12PQ");
        assert!(matches!(
            UserId::parse(""),
            Err(UserIdError::InvalidLength { .. })
        ));
        assert!(matches!(
            UserId::parse(&"A".repeat(65)),
            Err(UserIdError::InvalidLength { .. })
        ));
        assert_eq!(
            UserId::parse("A7ZB-12PQ"),
            Err(UserIdError::InvalidCharacters)
        );
        assert_eq!(
            UserId::parse("A7ZB 12PQ"),
            Err(UserIdError::InvalidCharacters)
        );
    }

    #[test]
    fn test_person_name_trims_and_validates() {
        assert_eq!(
            PersonName::new("  Alice ".to_string()).unwrap().as_str(),
            "Alice"
        );
        assert_eq!(PersonName::new("   ".to_string()), Err(NameError::Empty));
        assert!(matches!(
            PersonName::new("x".repeat(101)),
            Err(NameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_email_address() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_email_address_ignores_case() {
        let mixed = EmailAddress::new(" Alice@Example.COM ".to_string()).unwrap();
        let lower = EmailAddress::new("alice@example.com".to_string()).unwrap();

        assert_eq!(mixed.as_str(), "alice@example.com");
        assert_eq!(mixed, lower);
    }

    #[test]
    fn test_balance_rejects_negative() {
        assert_eq!(Balance::new(0).unwrap(), Balance::ZERO);
        assert_eq!(Balance::new(1250).unwrap().minor_units(), 1250);
        assert_eq!(Balance::new(-1), Err(BalanceError::Negative(-1)));
    }

    #[test]
    fn test_bearer_format() {
        let token = AccessToken {
            token: "abc.def.ghi".to_string(),
            expires_at: Utc::now(),
        };
        assert_eq!(token.bearer(), "Bearer abc.def.ghi");
    }
}
