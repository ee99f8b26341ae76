//! # Database Models
//!
//! Rows of the two collections plus their create/update payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

// region: --- AdminConfig

/// One `admin_config` key/value row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct AdminConfig {
    pub id: String,
    pub key: String,
    pub value: String,
    pub created: String,
    pub updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfigForCreate {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfigForUpdate {
    pub value: String,
}

// endregion: --- AdminConfig

// region: --- ShoppingList

/// `shopping_lists` row as stored; `data` is raw JSON text.
#[derive(Debug, Clone, FromRow)]
pub struct ShoppingListRow {
    pub id: String,
    pub list_code: String,
    pub data: String,
    pub created: String,
    pub updated: String,
}

/// Shopping list with its JSON document decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingList {
    pub id: String,
    pub list_code: String,
    pub data: Value,
    pub created: String,
    pub updated: String,
}

impl TryFrom<ShoppingListRow> for ShoppingList {
    type Error = serde_json::Error;

    fn try_from(row: ShoppingListRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            list_code: row.list_code,
            data: serde_json::from_str(&row.data)?,
            created: row.created,
            updated: row.updated,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListForCreate {
    pub list_code: String,
    #[serde(default = "empty_document")]
    pub data: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShoppingListForUpdate {
    pub list_code: Option<String>,
    pub data: Option<Value>,
}

fn empty_document() -> Value {
    Value::Object(Default::default())
}

// endregion: --- ShoppingList
