//! Menu Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Menu entity (菜单，隶属于一个 Category)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub image: String,
    /// Category reference
    #[serde(with = "serde_helpers::record_id")]
    pub category: RecordId,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_deleted: bool,
}

/// Create menu payload
#[derive(Debug, Clone, Deserialize)]
pub struct MenuCreate {
    pub name: String,
    pub image: String,
    #[serde(with = "serde_helpers::record_id")]
    pub category: RecordId,
}

/// Update menu payload (partial merge)
#[derive(Debug, Clone, Deserialize)]
pub struct MenuUpdate {
    pub name: Option<String>,
    pub image: Option<String>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub category: Option<RecordId>,
}
