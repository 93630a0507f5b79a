use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument};

use super::{dto::CategoryRequest, repo::Category};
use crate::{
    auth::Principal,
    error::ApiError,
    extract::ValidatedJson,
    resources::{deleted, Loaded, Message},
    state::AppState,
};

/// Own categories plus the global defaults.
#[instrument(skip_all, fields(user_id = %principal.user_id()))]
pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.categories.find_by_owner(principal.user_id()).await?;
    Ok(Json(categories))
}

#[instrument(skip_all, fields(user_id = %principal.user_id()))]
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedJson(body): ValidatedJson<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state
        .categories
        .create(principal.user_id(), body.into())
        .await?;
    info!(category_id = %category.id, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn get(Loaded(category): Loaded<Category>) -> Json<Category> {
    Json(category)
}

#[instrument(skip_all, fields(category_id = %category.id))]
pub async fn update(
    State(state): State<AppState>,
    Loaded(category): Loaded<Category>,
    ValidatedJson(body): ValidatedJson<CategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let updated = state
        .categories
        .update(category.id, body.into())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(updated))
}

#[instrument(skip_all, fields(category_id = %category.id))]
pub async fn delete(
    State(state): State<AppState>,
    Loaded(category): Loaded<Category>,
) -> Result<Json<Message>, ApiError> {
    if !state.categories.delete(category.id).await? {
        return Err(ApiError::NotFound);
    }
    info!("category deleted");
    Ok(deleted())
}
