use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    resources::{OwnedResource, ResourceStore},
    state::AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_type")]
pub enum TransactionType {
    Expense,
    Income,
    Transfer,
    Refund,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub transaction_type: TransactionType,
    pub account_id: Uuid,
    pub category_id: Uuid,
    pub created_by: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub amount: Decimal,
    pub note: Option<String>,
    pub transaction_type: TransactionType,
    pub account_id: Uuid,
    pub category_id: Uuid,
}

impl OwnedResource for Transaction {
    const KIND: &'static str = "transaction";
    type Draft = TransactionDraft;

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> Option<Uuid> {
        Some(self.created_by)
    }

    fn store(state: &AppState) -> Arc<dyn ResourceStore<Self>> {
        state.transactions.clone()
    }
}

pub struct PgTransactionStore {
    db: PgPool,
}

impl PgTransactionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResourceStore<Transaction> for PgTransactionStore {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Transaction>> {
        let row = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, amount, note, transaction_type, account_id, category_id,
                   created_by, created_at, updated_at
              FROM transactions
             WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get transaction by id")?;
        Ok(row)
    }

    async fn find_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, amount, note, transaction_type, account_id, category_id,
                   created_by, created_at, updated_at
              FROM transactions
             WHERE created_by = $1 AND is_deleted = FALSE
             ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.db)
        .await
        .context("list transactions by owner")?;
        Ok(rows)
    }

    async fn create(&self, owner: Uuid, draft: TransactionDraft) -> anyhow::Result<Transaction> {
        let row = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions
                   (amount, note, transaction_type, account_id, category_id, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, amount, note, transaction_type, account_id, category_id,
                      created_by, created_at, updated_at
            "#,
        )
        .bind(draft.amount)
        .bind(&draft.note)
        .bind(draft.transaction_type)
        .bind(draft.account_id)
        .bind(draft.category_id)
        .bind(owner)
        .fetch_one(&self.db)
        .await
        .context("insert transaction")?;
        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        draft: TransactionDraft,
    ) -> anyhow::Result<Option<Transaction>> {
        let row = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions
               SET amount = $2, note = $3, transaction_type = $4,
                   account_id = $5, category_id = $6, updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, amount, note, transaction_type, account_id, category_id,
                      created_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(draft.amount)
        .bind(&draft.note)
        .bind(draft.transaction_type)
        .bind(draft.account_id)
        .bind(draft.category_id)
        .fetch_optional(&self.db)
        .await
        .context("update transaction")?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
               SET is_deleted = TRUE, updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await
        .context("delete transaction")?;
        Ok(result.rows_affected() > 0)
    }
}
