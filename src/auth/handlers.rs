use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{normalize_email, PublicUser, SignInRequest, SignUpRequest, TokenResponse},
        middleware::{refresh_cookie, refresh_token, removal_cookie},
        password::{hash_password_blocking, verify_password_blocking},
        repo::{NewUser, User},
        Principal,
    },
    error::ApiError,
    extract::ValidatedJson,
    state::AppState,
};

#[instrument(skip_all)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignUpRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let email = normalize_email(&payload.email);
    let password_hash = hash_password_blocking(payload.password).await?;

    let user = state
        .users
        .create(NewUser {
            name: payload.name.trim().to_string(),
            email,
            password_hash,
        })
        .await?
        .ok_or_else(|| {
            warn!("sign-up with an already registered email");
            ApiError::Conflict
        })?;

    info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip_all)]
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<SignInRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), ApiError> {
    let email = normalize_email(&payload.email);
    let user = state.users.find_by_email(&email).await?;

    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let verified = verify_password_blocking(payload.password, stored_hash).await?;

    let user = match user {
        Some(user) if verified => user,
        Some(user) => {
            warn!(user_id = %user.id, "sign-in with a wrong password");
            return Err(ApiError::InvalidCredentials);
        }
        None => {
            warn!("sign-in with an unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    info!(user_id = %user.id, "user signed in");
    issue_session(&state, jar, user)
}

/// Trades the refresh cookie for a new access token and rotates the cookie.
#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<TokenResponse>), ApiError> {
    let user_id = refresh_token(&jar)
        .and_then(|token| state.keys.verify_refresh(token))
        .map_err(|reason| {
            warn!(%reason, "refresh token rejected");
            ApiError::from(reason)
        })?;

    let user = state.users.find_by_id(user_id).await?.ok_or_else(|| {
        warn!(%user_id, "refresh for a user that no longer exists");
        ApiError::Unauthorized
    })?;

    issue_session(&state, jar, user)
}

pub async fn sign_out(jar: CookieJar) -> (CookieJar, StatusCode) {
    (jar.add(removal_cookie()), StatusCode::NO_CONTENT)
}

#[instrument(skip_all, fields(user_id = %principal.user_id()))]
pub async fn me(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state
        .users
        .find_by_id(principal.user_id())
        .await?
        .ok_or(ApiError::Unauthorized)?;
    Ok(Json(user.into()))
}

fn issue_session(
    state: &AppState,
    jar: CookieJar,
    user: User,
) -> Result<(CookieJar, Json<TokenResponse>), ApiError> {
    let access = state.keys.issue_access(&user)?;
    let refresh = state.keys.issue_refresh(user.id)?;

    let cookie = refresh_cookie(
        refresh.token,
        state.keys.refresh_ttl(),
        refresh.expires_at,
        state.config.cookie_secure,
    );

    Ok((
        jar.add(cookie),
        Json(TokenResponse {
            user: user.into(),
            access_token: access.token,
            token_type: "Bearer",
            expires_in: state.keys.access_ttl().whole_seconds(),
        }),
    ))
}
