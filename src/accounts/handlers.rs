use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument};

use super::{dto::AccountRequest, repo::Account};
use crate::{
    auth::Principal,
    error::ApiError,
    extract::ValidatedJson,
    resources::{deleted, Loaded, Message},
    state::AppState,
};

#[instrument(skip_all, fields(user_id = %principal.user_id()))]
pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = state.accounts.find_by_owner(principal.user_id()).await?;
    Ok(Json(accounts))
}

#[instrument(skip_all, fields(user_id = %principal.user_id()))]
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedJson(body): ValidatedJson<AccountRequest>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let account = state
        .accounts
        .create(principal.user_id(), body.into())
        .await?;
    info!(account_id = %account.id, "account created");
    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn get(Loaded(account): Loaded<Account>) -> Json<Account> {
    Json(account)
}

#[instrument(skip_all, fields(account_id = %account.id))]
pub async fn update(
    State(state): State<AppState>,
    Loaded(account): Loaded<Account>,
    ValidatedJson(body): ValidatedJson<AccountRequest>,
) -> Result<Json<Account>, ApiError> {
    let updated = state
        .accounts
        .update(account.id, body.into())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(updated))
}

#[instrument(skip_all, fields(account_id = %account.id))]
pub async fn delete(
    State(state): State<AppState>,
    Loaded(account): Loaded<Account>,
) -> Result<Json<Message>, ApiError> {
    if !state.accounts.delete(account.id).await? {
        return Err(ApiError::NotFound);
    }
    info!("account deleted");
    Ok(deleted())
}
