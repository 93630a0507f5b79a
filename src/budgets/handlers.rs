use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument};

use super::{dto::BudgetRequest, repo::Budget};
use crate::{
    auth::Principal,
    error::ApiError,
    extract::ValidatedJson,
    resources::{deleted, load_authorized, Access, Loaded, Message},
    state::AppState,
};

/// The referenced category must be the caller's own or a global one.
async fn ensure_category(
    state: &AppState,
    principal: &Principal,
    body: &BudgetRequest,
) -> Result<(), ApiError> {
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
) -> Result<Json<Vec<Budget>>, ApiError> {
    let budgets = state.budgets.find_by_owner(principal.user_id()).await?;
    Ok(Json(budgets))
}

#[instrument(skip_all, fields(user_id = %principal.user_id()))]
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedJson(body): ValidatedJson<BudgetRequest>,
) -> Result<(StatusCode, Json<Budget>), ApiError> {
    ensure_category(&state, &principal, &body).await?;
    let budget = state
        .budgets
        .create(principal.user_id(), body.into())
        .await?;
    info!(budget_id = %budget.id, "budget created");
    Ok((StatusCode::CREATED, Json(budget)))
}

pub async fn get(Loaded(budget): Loaded<Budget>) -> Json<Budget> {
    Json(budget)
}

#[instrument(skip_all, fields(budget_id = %budget.id))]
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Loaded(budget): Loaded<Budget>,
    ValidatedJson(body): ValidatedJson<BudgetRequest>,
) -> Result<Json<Budget>, ApiError> {
    ensure_category(&state, &principal, &body).await?;
    let updated = state
        .budgets
        .update(budget.id, body.into())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(updated))
}

#[instrument(skip_all, fields(budget_id = %budget.id))]
pub async fn delete(
    State(state): State<AppState>,
    Loaded(budget): Loaded<Budget>,
) -> Result<Json<Message>, ApiError> {
    if !state.budgets.delete(budget.id).await? {
        return Err(ApiError::NotFound);
    }
    info!("budget deleted");
    Ok(deleted())
}
