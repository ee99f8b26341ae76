//! # Record API Data Transfer Objects
//!
//! ## Wire Format
//!
//! List endpoints wrap their rows:
//!
//! ```text
//! GET /api/collections/shopping_lists/records?list_code=weekly
//!
//! { "items": [ { "id": "k3v9...", "list_code": "weekly", "data": {...}, ... } ], "total_items": 1 }
//! ```
//!
//! ## Query Parameters
//!
//! Besides the plain field parameters, the list endpoints accept the
//! PocketBase parameters the web client sends:
//!
//! | Parameter | Supported form |
//! |---|---|
//! | `filter` | one equality on the collection's lookup field: `list_code="weekly"`, `key='server_name'` |
//! | `sort` | the fixed order only: `-updated` (lists), `key` (admin config) |
//! | `page`, `perPage` | 1-based paging; no `perPage` returns everything |
//! | `skipTotal` | accepted; `total_items` is always computed |
//!
//! Any other parameter or filter expression is rejected with 400 rather than
//! ignored, so a client never mistakes an unfiltered list for a match.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// A page of records. `total_items` counts every row matching the filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordList<T> {
    pub items: Vec<T>,
    pub total_items: usize,
}

impl<T> RecordList<T> {
    /// Cut one page out of `items`. Without `per_page` (or with 0) every item
    /// is returned; pages below 1 count as the first page.
    pub fn paged(items: Vec<T>, page: Option<usize>, per_page: Option<usize>) -> Self {
        let total_items = items.len();
        let items = match per_page.filter(|n| *n > 0) {
            Some(per_page) => {
                let skip = page.unwrap_or(1).max(1).saturating_sub(1).saturating_mul(per_page);
                items.into_iter().skip(skip).take(per_page).collect()
            }
            None => items,
        };

        Self { items, total_items }
    }
}

/// Query string of `GET /api/collections/shopping_lists/records`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShoppingListQuery {
    pub list_code: Option<String>,
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    #[serde(rename = "perPage")]
    pub per_page: Option<usize>,
    #[serde(rename = "skipTotal")]
    pub skip_total: Option<String>,
}

impl ShoppingListQuery {
    /// Check `sort` and resolve the exact `list_code` to match, if any.
    pub fn list_code_filter(&self) -> Result<Option<String>> {
        check_sort(self.sort.as_deref(), "-updated")?;
        exact_match("list_code", self.list_code.as_deref(), self.filter.as_deref())
    }
}

/// Query string of `GET /api/collections/admin_config/records`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfigQuery {
    pub key: Option<String>,
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    #[serde(rename = "perPage")]
    pub per_page: Option<usize>,
    #[serde(rename = "skipTotal")]
    pub skip_total: Option<String>,
}

impl AdminConfigQuery {
    /// Check `sort` and resolve the exact `key` to match, if any.
    pub fn key_filter(&self) -> Result<Option<String>> {
        check_sort(self.sort.as_deref(), "key")?;
        exact_match("key", self.key.as_deref(), self.filter.as_deref())
    }
}

/// Parse a single equality filter on `field`: `field="value"` or `field='value'`.
pub fn parse_equality_filter(field: &str, filter: &str) -> Result<String> {
    let unsupported = || AppError::InvalidInput(format!("Unsupported filter: {filter}"));

    let (name, value) = filter.split_once('=').ok_or_else(unsupported)?;
    if name.trim() != field {
        return Err(unsupported());
    }

    let value = value.trim();
    let quote = value
        .chars()
        .next()
        .filter(|c| *c == '"' || *c == '\'')
        .ok_or_else(unsupported)?;
    let inner = value
        .strip_prefix(quote)
        .and_then(|v| v.strip_suffix(quote))
        .ok_or_else(unsupported)?;

    // A quote inside means a second clause or an escape we do not evaluate
    if inner.contains(quote) {
        return Err(unsupported());
    }

    Ok(inner.to_string())
}

fn exact_match(field: &str, direct: Option<&str>, filter: Option<&str>) -> Result<Option<String>> {
    let from_filter = filter.map(|f| parse_equality_filter(field, f)).transpose()?;

    match (direct, from_filter) {
        (Some(direct), Some(filtered)) if direct != filtered => Err(AppError::InvalidInput(format!(
            "{field} and filter disagree: '{direct}' vs '{filtered}'"
        ))),
        (Some(direct), _) => Ok(Some(direct.to_string())),
        (None, filtered) => Ok(filtered),
    }
}

fn check_sort(sort: Option<&str>, supported: &str) -> Result<()> {
    match sort {
        Some(sort) if sort != supported => Err(AppError::InvalidInput(format!(
            "Unsupported sort '{sort}', only '{supported}' is available"
        ))),
        _ => Ok(()),
    }
}

/// Body of `POST /api/settings/test/email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestEmailRequest {
    pub email: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub code: u16,
    pub message: String,
}

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_filter_accepts_both_quote_styles() {
        assert_eq!(parse_equality_filter("list_code", r#"list_code="weekly""#).unwrap(), "weekly");
        assert_eq!(parse_equality_filter("key", "key = 'server_name'").unwrap(), "server_name");
    }

    #[test]
    fn other_filter_expressions_are_rejected() {
        for filter in [
            r#"list_code!="weekly""#,
            r#"list_code~"week""#,
            r#"name="weekly""#,
            r#"list_code="a" && key="b""#,
            "list_code=weekly",
            r#"list_code=""#,
        ] {
            let err = parse_equality_filter("list_code", filter).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)), "{filter}");
        }
    }

    #[test]
    fn direct_parameter_and_filter_must_agree() {
        let query = ShoppingListQuery {
            list_code: Some("weekly".to_string()),
            filter: Some(r#"list_code="party""#.to_string()),
            ..Default::default()
        };
        assert!(query.list_code_filter().is_err());

        let query = ShoppingListQuery {
            filter: Some(r#"list_code="party""#.to_string()),
            sort: Some("-updated".to_string()),
            ..Default::default()
        };
        assert_eq!(query.list_code_filter().unwrap().as_deref(), Some("party"));
    }

    #[test]
    fn unsupported_sort_is_rejected() {
        let query = AdminConfigQuery { sort: Some("-created".to_string()), ..Default::default() };
        assert!(query.key_filter().is_err());
    }

    #[test]
    fn paging_keeps_the_total() {
        let page = RecordList::paged(vec![1, 2, 3, 4, 5], Some(2), Some(2));
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.total_items, 5);

        let all = RecordList::paged(vec![1, 2, 3], Some(0), None);
        assert_eq!(all.items, vec![1, 2, 3]);

        let past_end = RecordList::paged(vec![1, 2, 3], Some(9), Some(2));
        assert!(past_end.items.is_empty());
    }
}
// endregion: --- Tests
