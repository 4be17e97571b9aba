//! Product Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Product entity (菜品)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Unique among non-deleted products
    pub product_number: String,
    pub price: f64,
    /// Menu reference
    #[serde(with = "serde_helpers::record_id")]
    pub menu: RecordId,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_deleted: bool,
}

/// Create product payload
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub image: String,
    pub product_number: String,
    pub price: f64,
    #[serde(with = "serde_helpers::record_id")]
    pub menu: RecordId,
}

/// Update product payload (partial merge)
#[derive(Debug, Clone, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub product_number: Option<String>,
    pub price: Option<f64>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub menu: Option<RecordId>,
}

/// Menu summary joined onto product listings (read-only view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSummary {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(with = "serde_helpers::record_id")]
    pub category: RecordId,
}

/// Product joined with its menu summary
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithMenu {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "menuData", skip_serializing_if = "Option::is_none")]
    pub menu_data: Option<MenuSummary>,
}
