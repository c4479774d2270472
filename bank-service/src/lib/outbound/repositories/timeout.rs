use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::domain::account::models::AccountLedgerRecord;
use crate::domain::account::models::Credential;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::UserId;
use crate::domain::account::ports::CredentialStore;

/// Bounds every call of the wrapped store.
///
/// An elapsed call fails with `StoreTimeout`. The inner future is dropped, so
/// a PostgreSQL transaction in flight is rolled back.
pub struct TimeoutCredentialStore<S>
where
    S: CredentialStore + ?Sized,
{
    inner: Arc<S>,
    timeout: Duration,
}

impl<S> TimeoutCredentialStore<S>
where
    S: CredentialStore + ?Sized,
{
    pub fn new(inner: Arc<S>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, AccountError>>,
    ) -> Result<T, AccountError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                tracing::warn!(operation, timeout_ms, "Credential store call timed out");
                Err(AccountError::StoreTimeout(timeout_ms))
            }
        }
    }
}

#[async_trait]
impl<S> CredentialStore for TimeoutCredentialStore<S>
where
    S: CredentialStore + ?Sized,
{
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Credential>, AccountError> {
        self.bounded("find_by_user_id", self.inner.find_by_user_id(user_id))
            .await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, AccountError> {
        self.bounded("find_by_email", self.inner.find_by_email(email))
            .await
    }

    async fn find_ledger_record(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccountLedgerRecord>, AccountError> {
        self.bounded("find_ledger_record", self.inner.find_ledger_record(user_id))
            .await
    }

    async fn save(
        &self,
        credential: Credential,
        record: AccountLedgerRecord,
    ) -> Result<(), AccountError> {
        self.bounded("save", self.inner.save(credential, record))
            .await
    }
}
