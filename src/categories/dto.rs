use serde::Deserialize;
use validator::Validate;

use super::repo::CategoryDraft;
use crate::extract::not_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(custom(function = "not_blank"), length(max = 64))]
    pub name: String,
    pub note: Option<String>,
}

impl From<CategoryRequest> for CategoryDraft {
    fn from(req: CategoryRequest) -> Self {
        Self {
            name: req.name.trim().to_string(),
            note: req.note.filter(|n| !n.trim().is_empty()),
        }
    }
}
