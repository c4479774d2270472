use std::collections::HashMap;
use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::account::errors::IdentifierField;
use crate::domain::account::models::AccountLedgerRecord;
use crate::domain::account::models::Credential;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::UserId;
use crate::domain::account::ports::CredentialStore;

/// Process-local credential store.
///
/// Enforces the same uniqueness rules as the PostgreSQL schema. All checks
/// for one `save` and the inserts that follow happen under a single write
/// lock, so two racing registrations never both win the same identifier.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    credentials: HashMap<UserId, Credential>,
    ledger: HashMap<UserId, AccountLedgerRecord>,
    emails: HashMap<String, UserId>,
    account_numbers: HashSet<String>,
    pins: HashSet<String>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.credentials.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Credential>, AccountError> {
        Ok(self.state.read().await.credentials.get(user_id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, AccountError> {
        let state = self.state.read().await;
        Ok(state
            .emails
            .get(email.as_str())
            .and_then(|user_id| state.credentials.get(user_id))
            .cloned())
    }

    async fn find_ledger_record(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccountLedgerRecord>, AccountError> {
        Ok(self.state.read().await.ledger.get(user_id).cloned())
    }

    async fn save(
        &self,
        credential: Credential,
        record: AccountLedgerRecord,
    ) -> Result<(), AccountError> {
        let mut state = self.state.write().await;

        if state.credentials.contains_key(&credential.user_id) {
            return Err(AccountError::IdentifierTaken(IdentifierField::UserId));
        }
        if state.emails.contains_key(credential.email.as_str()) {
            return Err(AccountError::EmailAlreadyExists(
                credential.email.as_str().to_string(),
            ));
        }
        if state.account_numbers.contains(record.account_number.as_str()) {
            return Err(AccountError::IdentifierTaken(IdentifierField::AccountNumber));
        }
        if state.pins.contains(record.pin.as_str()) {
            return Err(AccountError::IdentifierTaken(IdentifierField::Pin));
        }

        state
            .emails
            .insert(credential.email.as_str().to_string(), credential.user_id.clone());
        state
            .account_numbers
            .insert(record.account_number.as_str().to_string());
        state.pins.insert(record.pin.as_str().to_string());
        state.ledger.insert(record.user_id.clone(), record);
        state.credentials.insert(credential.user_id.clone(), credential);

        Ok(())
    }
}
