use axum::http::Method;

use super::OwnedResource;
use crate::auth::Principal;

/// What the caller intends to do with a loaded resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    pub fn for_method(method: &Method) -> Self {
        if method.is_safe() {
            Access::Read
        } else {
            Access::Write
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Forbidden,
}

/// Owners may do anything; global rows are read-only for everyone.
pub fn authorize<R: OwnedResource>(principal: &Principal, resource: &R, access: Access) -> Decision {
    match resource.owner() {
        Some(owner) if owner == principal.user_id() => Decision::Allowed,
        None if access == Access::Read => Decision::Allowed,
        _ => Decision::Forbidden,
    }
}
