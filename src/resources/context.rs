use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{authorize, Access, Decision, OwnedResource, ResourceStore};
use crate::{auth::Principal, error::ApiError, state::AppState};

/// A resource the caller has already been authorized for, attached by
/// [`resource_context`]. One slot per resource type.
#[derive(Debug, Clone)]
pub struct Loaded<R>(pub R);

pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("'{raw}' is not a valid id")))
}

/// Existence first (404), ownership second (403).
pub async fn load_authorized<R: OwnedResource>(
    store: &dyn ResourceStore<R>,
    principal: &Principal,
    id: Uuid,
    access: Access,
) -> Result<R, ApiError> {
    let resource = store.find_by_id(id).await?.ok_or_else(|| {
        debug!(kind = R::KIND, %id, "resource not found");
        ApiError::NotFound
    })?;

    match authorize(principal, &resource, access) {
        Decision::Allowed => Ok(resource),
        Decision::Forbidden => {
            warn!(
                kind = R::KIND,
                %id,
                user_id = %principal.user_id(),
                ?access,
                "ownership check denied"
            );
            Err(ApiError::Forbidden)
        }
    }
}

/// Middleware for `/:id` routes: parse the id, load the row, run the
/// ownership gate for the request's method, attach `Loaded<R>`.
pub async fn resource_context<R: OwnedResource>(
    State(state): State<AppState>,
    principal: Principal,
    Path(raw_id): Path<String>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id)?;
    let access = Access::for_method(req.method());
    let store = R::store(&state);
    let resource = load_authorized(store.as_ref(), &principal, id, access).await?;

    req.extensions_mut().insert(Loaded(resource));
    Ok(next.run(req).await)
}

#[async_trait]
impl<R, S> FromRequestParts<S> for Loaded<R>
where
    R: OwnedResource,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Loaded<R>>().cloned().ok_or_else(|| {
            ApiError::Internal(format!(
                "no {} attached for {}; resource_context missing",
                R::KIND,
                parts.uri.path()
            ))
        })
    }
}
