use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::UserId;
use crate::inbound::http::router::AppState;

/// Caller resolved from a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: EmailAddress,
}

/// Request-scoped identity, inserted into the request extensions on every
/// request that passes through `authenticate`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestIdentity {
    #[default]
    Anonymous,
    Authenticated(AuthenticatedUser),
}

impl RequestIdentity {
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            RequestIdentity::Authenticated(user) => Some(user),
            RequestIdentity::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

/// Middleware that turns a bearer token into a `RequestIdentity`.
///
/// Never rejects: a missing, invalid or expired token, a subject without a
/// credential and a failing store all leave the request anonymous. Whether
/// an anonymous request may proceed is decided by the access policy.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = extract_bearer_token(req.headers()).map(str::to_string);

    let identity = match token {
        Some(token) => resolve_identity(&state, &token).await,
        None => RequestIdentity::Anonymous,
    };

    req.extensions_mut().insert(identity);
    next.run(req).await
}

async fn resolve_identity(state: &AppState, token: &str) -> RequestIdentity {
    let subject = match state.authenticator.validate_token(token, state.clock.now()) {
        Ok(subject) => subject,
        Err(e) => {
            tracing::debug!(error = %e, "Bearer token rejected");
            return RequestIdentity::Anonymous;
        }
    };

    let user_id = match UserId::parse(&subject) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::debug!(error = %e, "Token subject is not a user id");
            return RequestIdentity::Anonymous;
        }
    };

    match state.credential_store.find_by_user_id(&user_id).await {
        Ok(Some(credential)) => RequestIdentity::Authenticated(AuthenticatedUser {
            user_id: credential.user_id,
            email: credential.email,
        }),
        Ok(None) => {
            tracing::debug!(user_id = %user_id, "Token subject has no credential");
            RequestIdentity::Anonymous
        }
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Credential lookup failed");
            RequestIdentity::Anonymous
        }
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
