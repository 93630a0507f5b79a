use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use super::repo::AccountDraft;
use crate::extract::{non_negative, not_blank};

/// Body of `POST /accounts` and `PUT /accounts/:id`.
#[derive(Debug, Deserialize, Validate)]
pub struct AccountRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "non_negative"))]
    pub balance: Decimal,
    pub note: Option<String>,
}

impl From<AccountRequest> for AccountDraft {
    fn from(req: AccountRequest) -> Self {
        Self {
            name: req.name.trim().to_string(),
            note: req.note.filter(|n| !n.trim().is_empty()),
            balance: req.balance,
        }
    }
}
