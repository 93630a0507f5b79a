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

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub balance: Decimal,
    pub created_by: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct AccountDraft {
    pub name: String,
    pub note: Option<String>,
    pub balance: Decimal,
}

impl OwnedResource for Account {
    const KIND: &'static str = "account";
    type Draft = AccountDraft;

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> Option<Uuid> {
        Some(self.created_by)
    }

    fn store(state: &AppState) -> Arc<dyn ResourceStore<Self>> {
        state.accounts.clone()
    }
}

pub struct PgAccountStore {
    db: PgPool,
}

impl PgAccountStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResourceStore<Account> for PgAccountStore {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Account>> {
        let row = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, note, balance, created_by, created_at, updated_at
              FROM accounts
             WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get account by id")?;
        Ok(row)
    }

    async fn find_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Account>> {
        let rows = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, note, balance, created_by, created_at, updated_at
              FROM accounts
             WHERE created_by = $1 AND is_deleted = FALSE
             ORDER BY name ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.db)
        .await
        .context("list accounts by owner")?;
        Ok(rows)
    }

    async fn create(&self, owner: Uuid, draft: AccountDraft) -> anyhow::Result<Account> {
        let row = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (name, note, balance, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, note, balance, created_by, created_at, updated_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.note)
        .bind(draft.balance)
        .bind(owner)
        .fetch_one(&self.db)
        .await
        .context("insert account")?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, draft: AccountDraft) -> anyhow::Result<Option<Account>> {
        let row = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
               SET name = $2, note = $3, balance = $4, updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, name, note, balance, created_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.note)
        .bind(draft.balance)
        .fetch_optional(&self.db)
        .await
        .context("update account")?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
               SET is_deleted = TRUE, updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await
        .context("delete account")?;
        Ok(result.rows_affected() > 0)
    }
}
