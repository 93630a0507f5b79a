use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;

/// Verified identity of the caller for one request.
///
/// Only the token verifier builds one; handlers receive it through the
/// extractor below, which reads the value the auth middleware attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject: String,
    user_id: Uuid,
    name: String,
    email: String,
    issued_at: OffsetDateTime,
    expires_at: OffsetDateTime,
}

impl Principal {
    pub(super) fn new(
        user_id: Uuid,
        name: String,
        email: String,
        issued_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Self {
        Self {
            subject: user_id.to_string(),
            user_id,
            name,
            email,
            issued_at,
            expires_at,
        }
    }

    /// Canonical hyphenated form of the user id carried in `sub`.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn issued_at(&self) -> OffsetDateTime {
        self.issued_at
    }

    pub fn expires_at(&self) -> OffsetDateTime {
        self.expires_at
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Absent only when a route was mounted without `require_access`.
        parts.extensions.get::<Principal>().cloned().ok_or_else(|| {
            ApiError::Internal(format!(
                "no principal attached for {}; auth middleware missing",
                parts.uri.path()
            ))
        })
    }
}
