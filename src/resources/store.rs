use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::state::AppState;

/// A row that records which user created it.
pub trait OwnedResource: Clone + Send + Sync + 'static {
    /// Short name used in logs.
    const KIND: &'static str;

    /// Mutable fields accepted on create and update.
    type Draft: Send + 'static;

    fn id(&self) -> Uuid;

    /// `None` marks a global row: readable by everyone, writable by no one.
    fn owner(&self) -> Option<Uuid>;

    /// The store this family is loaded from.
    fn store(state: &AppState) -> Arc<dyn ResourceStore<Self>>;
}

/// Persistence contract of one resource family.
///
/// Every method is a single statement at the store; deleted rows are
/// invisible to all of them.
#[async_trait]
pub trait ResourceStore<R: OwnedResource>: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<R>>;

    /// Rows visible in the owner's listing.
    async fn find_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<R>>;

    async fn create(&self, owner: Uuid, draft: R::Draft) -> anyhow::Result<R>;

    /// `None` if the row vanished since it was loaded.
    async fn update(&self, id: Uuid, draft: R::Draft) -> anyhow::Result<Option<R>>;

    /// Soft delete. `false` if there was no live row to delete.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
