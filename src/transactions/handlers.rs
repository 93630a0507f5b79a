use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument};

use super::{dto::TransactionRequest, repo::Transaction};
use crate::{
    auth::Principal,
    error::ApiError,
    extract::ValidatedJson,
    resources::{deleted, load_authorized, Access, Loaded, Message},
    state::AppState,
};

/// Booking against an account needs write access to it; the category only
/// has to be readable.
async fn ensure_references(
    state: &AppState,
    principal: &Principal,
    body: &TransactionRequest,
) -> Result<(), ApiError> {
    load_authorized(
        state.accounts.as_ref(),
        principal,
        body.account_id,
        Access::Write,
    )
    .await?;
    load_authorized(
        state.categories.as_ref(),
        principal,
        body.category_id,
        Access::Read,
    )
    .await?;
    Ok(())
}

#[instrument(skip_all, fields(user_id = %principal.user_id()))]
pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let transactions = state
        .transactions
        .find_by_owner(principal.user_id())
        .await?;
    Ok(Json(transactions))
}

#[instrument(skip_all, fields(user_id = %principal.user_id()))]
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedJson(body): ValidatedJson<TransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    ensure_references(&state, &principal, &body).await?;
    let transaction = state
        .transactions
        .create(principal.user_id(), body.into())
        .await?;
    info!(transaction_id = %transaction.id, "transaction created");
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn get(Loaded(transaction): Loaded<Transaction>) -> Json<Transaction> {
    Json(transaction)
}

#[instrument(skip_all, fields(transaction_id = %transaction.id))]
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Loaded(transaction): Loaded<Transaction>,
    ValidatedJson(body): ValidatedJson<TransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    ensure_references(&state, &principal, &body).await?;
    let updated = state
        .transactions
        .update(transaction.id, body.into())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(updated))
}

#[instrument(skip_all, fields(transaction_id = %transaction.id))]
pub async fn delete(
    State(state): State<AppState>,
    Loaded(transaction): Loaded<Transaction>,
) -> Result<Json<Message>, ApiError> {
    if !state.transactions.delete(transaction.id).await? {
        return Err(ApiError::NotFound);
    }
    info!("transaction deleted");
    Ok(deleted())
}
