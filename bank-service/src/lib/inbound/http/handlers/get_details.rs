use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AccountLedgerRecord;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::middleware::RequestIdentity;
use crate::inbound::http::router::AppState;

pub async fn get_details(
    State(state): State<AppState>,
    Extension(identity): Extension<RequestIdentity>,
) -> Result<ApiSuccess<AccountDetailsData>, ApiError> {
    let user = identity
        .user()
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;

    state
        .account_service
        .get_account(&user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref record| ApiSuccess::new(StatusCode::OK, record.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetailsData {
    pub user_id: String,
    pub account_number: String,
    pub routing_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&AccountLedgerRecord> for AccountDetailsData {
    fn from(record: &AccountLedgerRecord) -> Self {
        Self {
            user_id: record.user_id.to_string(),
            account_number: record.account_number.to_string(),
            routing_code: record.routing_code.to_string(),
            first_name: record.first_name.as_str().to_string(),
            last_name: record.last_name.as_str().to_string(),
            email: record.email.as_str().to_string(),
            balance: record.balance.minor_units(),
            created_at: record.created_at,
        }
    }
}
