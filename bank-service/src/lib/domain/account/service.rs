use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Clock;
use auth::IdentifierGenerator;

use crate::account::errors::AccountError;
use crate::account::ports::AccountServicePort;
use crate::account::ports::CredentialStore;
use crate::domain::account::models::AccessToken;
use crate::domain::account::models::AccountLedgerRecord;
use crate::domain::account::models::AccountNumber;
use crate::domain::account::models::Balance;
use crate::domain::account::models::Credential;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::Pin;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::RoutingCode;
use crate::domain::account::models::UserId;

/// Registration and login orchestrator.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<S>
where
    S: CredentialStore + ?Sized,
{
    store: Arc<S>,
    authenticator: Arc<Authenticator>,
    generator: IdentifierGenerator,
    clock: Arc<dyn Clock>,
    max_attempts: u32,
}

impl<S> AccountService<S>
where
    S: CredentialStore + ?Sized,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    /// * `generator` - Identifier candidate source
    /// * `clock` - Time source for token issuance
    /// * `max_attempts` - Registration attempts before `GenerationExhausted`
    pub fn new(
        store: Arc<S>,
        authenticator: Arc<Authenticator>,
        generator: IdentifierGenerator,
        clock: Arc<dyn Clock>,
        max_attempts: u32,
    ) -> Self {
        Self {
            store,
            authenticator,
            generator,
            clock,
            max_attempts,
        }
    }

    fn candidate_records(
        &self,
        command: &RegisterCommand,
        password_hash: &str,
    ) -> Result<(Credential, AccountLedgerRecord), AccountError> {
        let user_id = UserId::parse(
            &self
                .generator
                .new_user_id(self.generator.format().user_id_length),
        )?;
        let created_at = self.clock.now();

        let credential = Credential {
            user_id: user_id.clone(),
            email: command.email.clone(),
            password_hash: password_hash.to_string(),
            created_at,
        };

        let record = AccountLedgerRecord {
            user_id,
            account_number: AccountNumber::new(self.generator.new_account_number()),
            routing_code: RoutingCode::new(self.generator.new_routing_code()),
            pin: Pin::new(self.generator.new_pin()),
            first_name: command.first_name.clone(),
            last_name: command.last_name.clone(),
            email: command.email.clone(),
            balance: Balance::ZERO,
            created_at,
        };

        Ok((credential, record))
    }
}

#[async_trait]
impl<S> AccountServicePort for AccountService<S>
where
    S: CredentialStore + ?Sized,
{
    async fn register(&self, command: RegisterCommand) -> Result<AccountLedgerRecord, AccountError> {
        if command.password.is_empty() {
            return Err(AccountError::InvalidPassword(
                "password must not be empty".to_string(),
            ));
        }

        if self.store.find_by_email(&command.email).await?.is_some() {
            return Err(AccountError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        // Argon2 is CPU-bound; keep it off the async worker threads.
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| AccountError::Password(e.to_string()))?
                .map_err(|e| AccountError::Password(e.to_string()))?;

        for attempt in 1..=self.max_attempts {
            let (credential, record) = self.candidate_records(&command, &password_hash)?;

            match self.store.save(credential, record.clone()).await {
                Ok(()) => {
                    tracing::info!(
                        user_id = %record.user_id,
                        account_number = %record.account_number,
                        attempt,
                        "Account registered"
                    );
                    return Ok(record);
                }
                Err(AccountError::IdentifierTaken(field)) => {
                    tracing::warn!(
                        field = %field,
                        attempt,
                        max_attempts = self.max_attempts,
                        "Generated identifier collided, regenerating"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        tracing::error!(
            attempts = self.max_attempts,
            "Identifier generation exhausted"
        );
        Err(AccountError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AccountError> {
        let credential = match UserId::parse(&command.user_id) {
            Ok(user_id) => self.store.find_by_user_id(&user_id).await?,
            Err(_) => None,
        };

        let authenticator = Arc::clone(&self.authenticator);
        let subject = command.user_id.clone();
        let password = command.password;
        let stored_hash = credential.map(|c| c.password_hash);
        let now = self.clock.now();

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&subject, &password, stored_hash.as_deref(), now)
        })
        .await
        .map_err(|e| AccountError::Password(e.to_string()))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
            AuthenticationError::JwtError(err) => AccountError::Token(err.to_string()),
        })?;

        tracing::info!(user_id = %command.user_id, "Login succeeded");

        Ok(AccessToken {
            token: result.access_token,
            expires_at: result.expires_at,
        })
    }

    async fn get_account(&self, user_id: &UserId) -> Result<AccountLedgerRecord, AccountError> {
        self.store
            .find_ledger_record(user_id)
            .await?
            .ok_or(AccountError::NotFound(user_id.to_string()))
    }
}
