use std::fmt;

use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("User ID must be 1 to {max} characters, got {actual}")]
    InvalidLength { max: usize, actual: usize },

    #[error("User ID contains invalid characters (only ASCII letters and digits allowed)")]
    InvalidCharacters,
}

/// Error for first/last name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Balance construction failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BalanceError {
    #[error("Balance cannot be negative: {0}")]
    Negative(i64),
}

/// Generated identifier that collided with an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierField {
    UserId,
    AccountNumber,
    Pin,
}

impl fmt::Display for IdentifierField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdentifierField::UserId => "user_id",
            IdentifierField::AccountNumber => "account_number",
            IdentifierField::Pin => "pin",
        };
        f.write_str(name)
    }
}

/// Top-level error for all account-related operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid balance: {0}")]
    InvalidBalance(#[from] BalanceError),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    // Domain-level errors
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Generated {0} already exists")]
    IdentifierTaken(IdentifierField),

    #[error("Could not allocate unique account identifiers after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(String),

    #[error("Token error: {0}")]
    Token(String),

    // Infrastructure errors
    #[error("Credential store timed out after {0} ms")]
    StoreTimeout(u64),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
