use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned product identifier. Assigned as `max(existing) + 1`,
/// starting at `1` for an empty catalog.
pub type ProductId = u64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// Absent until the first update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Client-supplied fields for a create or update request, pre-validation.
///
/// Everything is optional at the type level so the validation policy can
/// report which field is missing; on update, omitted fields keep their
/// stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
}
