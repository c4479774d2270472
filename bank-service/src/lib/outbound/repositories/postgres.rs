use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::account::errors::AccountError;
use crate::account::errors::IdentifierField;
use crate::domain::account::models::AccountLedgerRecord;
use crate::domain::account::models::AccountNumber;
use crate::domain::account::models::Balance;
use crate::domain::account::models::Credential;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::PersonName;
use crate::domain::account::models::Pin;
use crate::domain::account::models::RoutingCode;
use crate::domain::account::models::UserId;
use crate::domain::account::ports::CredentialStore;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CredentialRow {
    user_id: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = AccountError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        Ok(Credential {
            user_id: UserId::parse(&row.user_id)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct LedgerRow {
    user_id: String,
    account_number: String,
    routing_code: String,
    pin: String,
    first_name: String,
    last_name: String,
    email: String,
    balance: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<LedgerRow> for AccountLedgerRecord {
    type Error = AccountError;

    fn try_from(row: LedgerRow) -> Result<Self, Self::Error> {
        Ok(AccountLedgerRecord {
            user_id: UserId::parse(&row.user_id)?,
            account_number: AccountNumber::new(row.account_number),
            routing_code: RoutingCode::new(row.routing_code),
            pin: Pin::new(row.pin),
            first_name: PersonName::new(row.first_name)?,
            last_name: PersonName::new(row.last_name)?,
            email: EmailAddress::new(row.email)?,
            balance: Balance::new(row.balance)?,
            created_at: row.created_at,
        })
    }
}

/// Translate a unique constraint name from the schema into a domain error.
fn unique_violation(constraint: Option<&str>, email: &EmailAddress) -> Option<AccountError> {
    match constraint? {
        "credentials_pkey" | "account_ledger_pkey" => {
            Some(AccountError::IdentifierTaken(IdentifierField::UserId))
        }
        "credentials_email_key" => Some(AccountError::EmailAlreadyExists(
            email.as_str().to_string(),
        )),
        "account_ledger_account_number_key" => {
            Some(AccountError::IdentifierTaken(IdentifierField::AccountNumber))
        }
        "account_ledger_pin_key" => Some(AccountError::IdentifierTaken(IdentifierField::Pin)),
        _ => None,
    }
}

fn map_save_error(e: sqlx::Error, email: &EmailAddress) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if let Some(err) = unique_violation(db_err.constraint(), email) {
                return err;
            }
        }
    }
    AccountError::DatabaseError(e.to_string())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Credential>, AccountError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT user_id, email, password_hash, created_at
            FROM credentials
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Credential::try_from).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, AccountError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT user_id, email, password_hash, created_at
            FROM credentials
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Credential::try_from).transpose()
    }

    async fn find_ledger_record(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccountLedgerRecord>, AccountError> {
        let row = sqlx::query_as::<_, LedgerRow>(
            r#"
            SELECT user_id, account_number, routing_code, pin, first_name, last_name,
                   email, balance, created_at
            FROM account_ledger
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(AccountLedgerRecord::try_from).transpose()
    }

    async fn save(
        &self,
        credential: Credential,
        record: AccountLedgerRecord,
    ) -> Result<(), AccountError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO credentials (user_id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(credential.user_id.as_str())
        .bind(credential.email.as_str())
        .bind(&credential.password_hash)
        .bind(credential.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_save_error(e, &credential.email))?;

        sqlx::query(
            r#"
            INSERT INTO account_ledger (user_id, account_number, routing_code, pin,
                                        first_name, last_name, email, balance, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.user_id.as_str())
        .bind(record.account_number.as_str())
        .bind(record.routing_code.as_str())
        .bind(record.pin.as_str())
        .bind(record.first_name.as_str())
        .bind(record.last_name.as_str())
        .bind(record.email.as_str())
        .bind(record.balance.minor_units())
        .bind(record.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_save_error(e, &record.email))?;

        // Dropping the transaction on an error path above rolls it back.
        tx.commit()
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        tracing::debug!(user_id = %credential.user_id, "Credential and ledger record stored");

        Ok(())
    }
}
