//! Ownership rules shared by every user-owned resource family.
//!
//! A family plugs in by implementing [`OwnedResource`] (which store loads it,
//! who owns a row) and [`ResourceStore`]; routing then wraps its `/:id` routes
//! in [`resource_context`] so handlers only ever see rows the caller may touch.

mod context;
mod gate;
mod store;

use axum::Json;
use serde::Serialize;

pub use context::{load_authorized, resource_context, Loaded};
pub use gate::{authorize, Access, Decision};
pub use store::{OwnedResource, ResourceStore};

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

pub fn deleted() -> Json<Message> {
    Json(Message {
        message: "Item deleted successfully",
    })
}
