use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

mod claims;
mod dto;
mod handlers;
pub mod jwt;
pub mod middleware;
mod password;
mod principal;
pub mod repo;

pub use jwt::JwtKeys;
pub use middleware::require_access;
pub use principal::Principal;

pub fn router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/auth/me", get(handlers::me))
        .route_layer(from_fn_with_state(state.keys.clone(), require_access));

    Router::new()
        .route("/auth/sign-up", post(handlers::sign_up))
        .route("/auth/sign-in", post(handlers::sign_in))
        .route("/auth/refresh-token", post(handlers::refresh))
        .route("/auth/sign-out", post(handlers::sign_out))
        .merge(protected)
}
