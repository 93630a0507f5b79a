use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::{
    resources::{OwnedResource, ResourceStore},
    state::AppState,
};

/// Seeded once as global rows (`created_by IS NULL`): name and note.
pub const DEFAULT_CATEGORIES: [(&str, &str); 9] = [
    ("Debt Payments", "Credit cards, student loans and other debt repayments."),
    ("Entertainment", "Movies, concerts, hobbies and vacations."),
    ("Food", "Groceries, dining out and snacks."),
    ("Health Care", "Insurance, doctor visits, prescriptions and other medical costs."),
    ("Housing", "Rent or mortgage, property taxes, insurance, repairs and maintenance."),
    ("Personal Care", "Haircuts, grooming products and gym memberships."),
    ("Savings", "Retirement, emergency fund and other financial goals."),
    ("Transportation", "Car payments, fuel, insurance, repairs and public transport."),
    ("Utilities", "Electricity, gas, water, internet and phone."),
];

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub note: Option<String>,
}

impl OwnedResource for Category {
    const KIND: &'static str = "category";
    type Draft = CategoryDraft;

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> Option<Uuid> {
        self.created_by
    }

    fn store(state: &AppState) -> Arc<dyn ResourceStore<Self>> {
        state.categories.clone()
    }
}

/// Inserts [`DEFAULT_CATEGORIES`] unless some global category already exists.
pub async fn seed_defaults(db: &PgPool) -> anyhow::Result<u64> {
    let (names, notes): (Vec<String>, Vec<String>) = DEFAULT_CATEGORIES
        .iter()
        .map(|(name, note)| (name.to_string(), note.to_string()))
        .unzip();
    let result = sqlx::query(
        r#"
        INSERT INTO categories (name, note, created_by)
        SELECT name, note, NULL FROM UNNEST($1::TEXT[], $2::TEXT[]) AS t(name, note)
         WHERE NOT EXISTS (
            SELECT 1 FROM categories WHERE created_by IS NULL AND is_deleted = FALSE
         )
        "#,
    )
    .bind(&names)
    .bind(&notes)
    .execute(db)
    .await
    .context("seed default categories")?;

    if result.rows_affected() > 0 {
        info!(count = result.rows_affected(), "seeded default categories");
    }
    Ok(result.rows_affected())
}

pub struct PgCategoryStore {
    db: PgPool,
}

impl PgCategoryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResourceStore<Category> for PgCategoryStore {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, note, created_by, created_at, updated_at
              FROM categories
             WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get category by id")?;
        Ok(row)
    }

    /// The owner's categories together with the global ones.
    async fn find_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, note, created_by, created_at, updated_at
              FROM categories
             WHERE (created_by = $1 OR created_by IS NULL) AND is_deleted = FALSE
             ORDER BY name ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.db)
        .await
        .context("list categories by owner")?;
        Ok(rows)
    }

    async fn create(&self, owner: Uuid, draft: CategoryDraft) -> anyhow::Result<Category> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, note, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, name, note, created_by, created_at, updated_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.note)
        .bind(owner)
        .fetch_one(&self.db)
        .await
        .context("insert category")?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, draft: CategoryDraft) -> anyhow::Result<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
               SET name = $2, note = $3, updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, name, note, created_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.note)
        .fetch_optional(&self.db)
        .await
        .context("update category")?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE categories
               SET is_deleted = TRUE, updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await
        .context("delete category")?;
        Ok(result.rows_affected() > 0)
    }
}
