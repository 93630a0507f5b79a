use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use super::jwt::{AuthError, JwtKeys};
use crate::error::ApiError;

pub const REFRESH_COOKIE: &str = "budgetto-refresh";
const REFRESH_COOKIE_PATH: &str = "/api/v1/auth";

/// Extracts the token from `Authorization: Bearer <token>`.
///
/// The header must appear once; the scheme is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let mut values = headers.get_all(AUTHORIZATION).iter();
    let value = values.next().ok_or(AuthError::MissingCredential)?;
    if values.next().is_some() {
        return Err(AuthError::MalformedCredential);
    }

    let raw = value.to_str().map_err(|_| AuthError::MalformedCredential)?;
    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        (None, _, _) => Err(AuthError::MissingCredential),
        _ => Err(AuthError::MalformedCredential),
    }
}

/// Rejects the request with 401 unless it carries a valid access token;
/// otherwise attaches the [`Principal`](super::Principal) for extractors.
pub async fn require_access(
    State(keys): State<Arc<JwtKeys>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = bearer_token(req.headers())
        .and_then(|token| keys.verify_access(token))
        .map_err(|reason| {
            debug!(%reason, path = %req.uri().path(), "access token rejected");
            ApiError::from(reason)
        })?;

    debug!(
        sub = principal.subject(),
        name = principal.name(),
        email = principal.email(),
        issued_at = %principal.issued_at(),
        expires_at = %principal.expires_at(),
        "caller authenticated"
    );
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

pub fn refresh_token(jar: &CookieJar) -> Result<&str, AuthError> {
    jar.get(REFRESH_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingCredential)
}

pub fn refresh_cookie(
    token: String,
    ttl: Duration,
    expires_at: OffsetDateTime,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .path(REFRESH_COOKIE_PATH)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(ttl)
        .expires(expires_at)
        .build()
}

/// Expired cookie with [`refresh_cookie`]'s name and path. Sent even when the
/// request carried no cookie.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((REFRESH_COOKIE, ""))
        .path(REFRESH_COOKIE_PATH)
        .http_only(true)
        .same_site(SameSite::Strict)
        .build();
    cookie.make_removal();
    cookie
}
