use axum::extract::Request;
use axum::extract::State;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use super::middleware::RequestIdentity;
use crate::inbound::http::router::AppState;

/// Access level required by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    RequiresIdentity,
}

/// Explicit route access table.
///
/// Rules are checked in insertion order and the first match wins. A request
/// matching no rule gets the default access level.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
    default: Access,
}

#[derive(Debug, Clone)]
struct AccessRule {
    method: Method,
    pattern: RoutePattern,
    access: Access,
}

/// Path pattern where `:name` segments match any single non-empty segment.
#[derive(Debug, Clone)]
struct RoutePattern(Vec<String>);

impl AccessPolicy {
    pub fn new(default: Access) -> Self {
        Self {
            rules: Vec::new(),
            default,
        }
    }

    pub fn rule(mut self, method: Method, pattern: &str, access: Access) -> Self {
        self.rules.push(AccessRule {
            method,
            pattern: RoutePattern::parse(pattern),
            access,
        });
        self
    }

    pub fn access_for(&self, method: &Method, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.method == *method && rule.pattern.matches(path))
            .map(|rule| rule.access)
            .unwrap_or(self.default)
    }
}

impl Default for AccessPolicy {
    /// Routes served by this service.
    fn default() -> Self {
        AccessPolicy::new(Access::RequiresIdentity)
            .rule(Method::POST, "/api/user/register", Access::Public)
            .rule(Method::POST, "/api/user/login", Access::Public)
            .rule(Method::GET, "/api/user/details", Access::RequiresIdentity)
            .rule(Method::GET, "/health", Access::Public)
    }
}

impl RoutePattern {
    fn parse(pattern: &str) -> Self {
        Self(segments(pattern).map(str::to_string).collect())
    }

    fn matches(&self, path: &str) -> bool {
        let mut expected = self.0.iter();
        let mut actual = segments(path);
        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return true,
                (Some(e), Some(a)) if e.starts_with(':') || e == a => continue,
                _ => return false,
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Middleware rejecting anonymous requests to routes that require an identity.
///
/// Must run after `authenticate`, which inserts the `RequestIdentity`.
pub async fn enforce(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let access = state
        .access_policy
        .access_for(req.method(), req.uri().path());

    let authenticated = req
        .extensions()
        .get::<RequestIdentity>()
        .is_some_and(RequestIdentity::is_authenticated);

    if access == Access::RequiresIdentity && !authenticated {
        tracing::debug!(
            method = %req.method(),
            path = req.uri().path(),
            "Anonymous request to protected route rejected"
        );
        return ApiError::Unauthorized("Unauthorized".to_string()).into_response();
    }

    next.run(req).await
}
