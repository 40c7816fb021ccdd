use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::names;

/// Identity forwarded by the auth layer through the `x-user-id` and
/// `x-user-name` headers. Anonymous requests carry neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requester {
    pub user_id: Option<String>,
    pub display_name: Option<String>,
}

impl Requester {
    pub fn is(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }
}

fn header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl<S: Send + Sync> FromRequestParts<S> for Requester {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Requester {
            user_id: header(parts, names::USER_ID_HEADER),
            display_name: header(parts, names::USER_NAME_HEADER),
        })
    }
}
