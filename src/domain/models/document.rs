//! Document-store domain types.
//!
//! These are store-agnostic descriptions of pages, property values and
//! query filters. The Notion adapter renders them to wire JSON; the
//! services only ever build and inspect these types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of a page returned by a search, query or create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    /// Opaque page identifier.
    pub id: String,
    /// Database the page lives in, when its parent is a database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_database_id: Option<String>,
    /// Link to view the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PageSummary {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_database_id: None,
            url: None,
        }
    }

    #[must_use]
    pub fn in_database(mut self, database_id: impl Into<String>) -> Self {
        self.parent_database_id = Some(database_id.into());
        self
    }

    /// Whether this page's parent is the given database.
    ///
    /// Database ids are compared without dashes and case-insensitively, since
    /// the same id appears as both `0123abcd...` and `0123abcd-...-...`.
    pub fn belongs_to(&self, database_id: &str) -> bool {
        self.parent_database_id
            .as_deref()
            .is_some_and(|parent| normalize_id(parent) == normalize_id(database_id))
    }
}

/// Strip dashes and lowercase an identifier for comparison.
pub fn normalize_id(id: &str) -> String {
    id.chars()
        .filter(|c| *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// A typed property value on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Title(String),
    RichText(String),
    Date(DateTime<Utc>),
    Relation(Vec<String>),
    Url(String),
}

/// Property name to value, in a stable order.
pub type PropertyBag = BTreeMap<String, PropertyValue>;

/// A filter for querying a database by a single property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyFilter {
    NumberEquals { property: String, value: u64 },
    RichTextEquals { property: String, value: String },
}

/// Everything needed to create one page in a database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePageRequest {
    pub database_id: String,
    pub properties: PropertyBag,
    /// Emoji icon for the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}
