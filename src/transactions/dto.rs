use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::repo::{TransactionDraft, TransactionType};
use crate::extract::non_negative;

/// An amount is always non-negative; `transaction_type` carries the direction.
#[derive(Debug, Deserialize, Validate)]
pub struct TransactionRequest {
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    pub note: Option<String>,
    pub transaction_type: TransactionType,
    pub account_id: Uuid,
    pub category_id: Uuid,
}

impl From<TransactionRequest> for TransactionDraft {
    fn from(req: TransactionRequest) -> Self {
        Self {
            amount: req.amount,
            note: req.note.filter(|n| !n.trim().is_empty()),
            transaction_type: req.transaction_type,
            account_id: req.account_id,
            category_id: req.category_id,
        }
    }
}
