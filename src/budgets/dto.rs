use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::repo::BudgetDraft;
use crate::extract::non_negative;

#[derive(Debug, Deserialize, Validate)]
pub struct BudgetRequest {
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    pub category_id: Uuid,
}

impl From<BudgetRequest> for BudgetDraft {
    fn from(req: BudgetRequest) -> Self {
        Self {
            amount: req.amount,
            category_id: req.category_id,
        }
    }
}
