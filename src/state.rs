use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    accounts::{Account, PgAccountStore},
    auth::{
        repo::{PgUserStore, UserStore},
        JwtKeys,
    },
    budgets::{Budget, PgBudgetStore},
    categories::{Category, PgCategoryStore},
    config::AppConfig,
    resources::ResourceStore,
    transactions::{PgTransactionStore, Transaction},
};

/// Everything a handler may depend on. Collaborators sit behind traits so
/// tests can swap Postgres for in-memory stores.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub keys: Arc<JwtKeys>,
    pub users: Arc<dyn UserStore>,
    pub accounts: Arc<dyn ResourceStore<Account>>,
    pub budgets: Arc<dyn ResourceStore<Budget>>,
    pub categories: Arc<dyn ResourceStore<Category>>,
    pub transactions: Arc<dyn ResourceStore<Transaction>>,
}

impl AppState {
    pub fn from_pool(config: AppConfig, db: PgPool) -> anyhow::Result<Self> {
        let keys = JwtKeys::from_config(&config.jwt)?;
        Ok(Self {
            config: Arc::new(config),
            keys: Arc::new(keys),
            users: Arc::new(PgUserStore::new(db.clone())),
            accounts: Arc::new(PgAccountStore::new(db.clone())),
            budgets: Arc::new(PgBudgetStore::new(db.clone())),
            categories: Arc::new(PgCategoryStore::new(db.clone())),
            transactions: Arc::new(PgTransactionStore::new(db)),
        })
    }
}
