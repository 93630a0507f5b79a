use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    resources::{OwnedResource, ResourceStore},
    state::AppState,
};

/// A spending limit for one category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Budget {
    pub id: Uuid,
    pub amount: Decimal,
    pub category_id: Uuid,
    pub created_by: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct BudgetDraft {
    pub amount: Decimal,
    pub category_id: Uuid,
}

impl OwnedResource for Budget {
    const KIND: &'static str = "budget";
    type Draft = BudgetDraft;

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> Option<Uuid> {
        Some(self.created_by)
    }

    fn store(state: &AppState) -> Arc<dyn ResourceStore<Self>> {
        state.budgets.clone()
    }
}

pub struct PgBudgetStore {
    db: PgPool,
}

impl PgBudgetStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResourceStore<Budget> for PgBudgetStore {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Budget>> {
        let row = sqlx::query_as::<_, Budget>(
            r#"
            SELECT id, amount, category_id, created_by, created_at, updated_at
              FROM budgets
             WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get budget by id")?;
        Ok(row)
    }

    async fn find_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Budget>> {
        let rows = sqlx::query_as::<_, Budget>(
            r#"
            SELECT id, amount, category_id, created_by, created_at, updated_at
              FROM budgets
             WHERE created_by = $1 AND is_deleted = FALSE
             ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.db)
        .await
        .context("list budgets by owner")?;
        Ok(rows)
    }

    async fn create(&self, owner: Uuid, draft: BudgetDraft) -> anyhow::Result<Budget> {
        let row = sqlx::query_as::<_, Budget>(
            r#"
            INSERT INTO budgets (amount, category_id, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, amount, category_id, created_by, created_at, updated_at
            "#,
        )
        .bind(draft.amount)
        .bind(draft.category_id)
        .bind(owner)
        .fetch_one(&self.db)
        .await
        .context("insert budget")?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, draft: BudgetDraft) -> anyhow::Result<Option<Budget>> {
        let row = sqlx::query_as::<_, Budget>(
            r#"
            UPDATE budgets
               SET amount = $2, category_id = $3, updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, amount, category_id, created_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(draft.amount)
        .bind(draft.category_id)
        .fetch_optional(&self.db)
        .await
        .context("update budget")?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE budgets
               SET is_deleted = TRUE, updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await
        .context("delete budget")?;
        Ok(result.rows_affected() > 0)
    }
}
