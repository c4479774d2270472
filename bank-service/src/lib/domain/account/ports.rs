use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::domain::account::models::AccessToken;
use crate::domain::account::models::AccountLedgerRecord;
use crate::domain::account::models::Credential;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::UserId;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// Generates identifiers, hashes the password and persists the credential
    /// together with its ledger record.
    ///
    /// # Arguments
    /// * `command` - Validated names, email and plaintext password
    ///
    /// # Returns
    /// Created ledger record with a zero balance
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `GenerationExhausted` - Identifier collisions exceeded the retry budget
    /// * `StoreTimeout` / `DatabaseError` - Credential store failure
    async fn register(&self, command: RegisterCommand) -> Result<AccountLedgerRecord, AccountError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `command` - Raw user id and plaintext password
    ///
    /// # Returns
    /// Access token bound to the user id
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password (indistinguishable)
    /// * `StoreTimeout` / `DatabaseError` - Credential store failure
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AccountError>;

    /// Retrieve the ledger record of an account.
    ///
    /// # Errors
    /// * `NotFound` - No ledger record for this user id
    /// * `StoreTimeout` / `DatabaseError` - Credential store failure
    async fn get_account(&self, user_id: &UserId) -> Result<AccountLedgerRecord, AccountError>;
}

/// Persistence operations for credentials and their ledger records.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve credential by user identifier.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Credential>, AccountError>;

    /// Retrieve credential by email address.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<Credential>, AccountError>;

    /// Retrieve the ledger record owned by a user.
    ///
    /// # Returns
    /// Optional ledger record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_ledger_record(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccountLedgerRecord>, AccountError>;

    /// Persist a credential and its ledger record atomically.
    ///
    /// Either both records are stored or neither is.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `IdentifierTaken` - User id, account number or PIN already in use
    /// * `DatabaseError` - Database operation failed
    async fn save(
        &self,
        credential: Credential,
        record: AccountLedgerRecord,
    ) -> Result<(), AccountError>;
}
