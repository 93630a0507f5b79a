use axum::{middleware, routing::get, Router};

use crate::{resources::resource_context, state::AppState};

mod dto;
mod handlers;
pub mod repo;

pub use repo::{seed_defaults, Category, PgCategoryStore};

pub fn router(state: &AppState) -> Router<AppState> {
    let by_id = Router::new()
        .route(
            "/categories/:id",
            get(handlers::get)
                .put(handlers::update)
                .delete(handlers::delete),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            resource_context::<Category>,
        ));

    Router::new()
        .route("/categories", get(handlers::list).post(handlers::create))
        .merge(by_id)
}
