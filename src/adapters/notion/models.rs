//! Notion API request and response models.
//!
//! Converts the store-agnostic [`PropertyBag`] and [`PropertyFilter`] into
//! Notion's JSON shapes, and maps page objects back to [`PageSummary`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::domain::models::{
    CreatePageRequest, PageSummary, PropertyBag, PropertyFilter, PropertyValue,
};

/// Maximum characters in a single rich text segment.
pub const MAX_TEXT_SEGMENT: usize = 2000;

/// Body of `POST /v1/search`.
#[derive(Debug, Clone, Serialize)]
pub struct NotionSearchRequest {
    pub query: String,
    pub filter: NotionSearchFilter,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

/// Search filter restricting results to one object type.
#[derive(Debug, Clone, Serialize)]
pub struct NotionSearchFilter {
    pub property: &'static str,
    pub value: &'static str,
}

impl NotionSearchFilter {
    pub const fn pages() -> Self {
        Self {
            property: "object",
            value: "page",
        }
    }
}

/// Body of `POST /v1/databases/{id}/query`.
#[derive(Debug, Clone, Serialize)]
pub struct NotionDatabaseQuery {
    pub filter: Value,
    pub page_size: u32,
}

/// Body of `POST /v1/pages`.
#[derive(Debug, Clone, Serialize)]
pub struct NotionCreatePage {
    pub parent: NotionDatabaseParent,
    pub properties: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotionDatabaseParent {
    pub database_id: String,
}

impl From<&CreatePageRequest> for NotionCreatePage {
    fn from(req: &CreatePageRequest) -> Self {
        Self {
            parent: NotionDatabaseParent {
                database_id: req.database_id.clone(),
            },
            properties: properties_to_json(&req.properties),
            icon: req
                .icon
                .as_ref()
                .map(|emoji| json!({ "type": "emoji", "emoji": emoji })),
        }
    }
}

/// Paginated list envelope returned by search and database queries.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionList {
    #[serde(default)]
    pub results: Vec<NotionPage>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A page object. Properties are not needed and are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionPage {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub parent: Option<NotionParent>,
}

/// The `parent` of a page. Only database parents carry a `database_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionParent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub database_id: Option<String>,
}

impl From<NotionPage> for PageSummary {
    fn from(page: NotionPage) -> Self {
        let parent_database_id = page
            .parent
            .filter(|p| p.kind == "database_id")
            .and_then(|p| p.database_id);
        Self {
            id: page.id,
            parent_database_id,
            url: page.url,
        }
    }
}

/// Error envelope returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Render a property bag as a Notion `properties` object.
pub fn properties_to_json(properties: &PropertyBag) -> Map<String, Value> {
    properties
        .iter()
        .map(|(name, value)| (name.clone(), property_to_json(value)))
        .collect()
}

fn property_to_json(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Title(text) => json!({ "title": rich_text(text) }),
        PropertyValue::RichText(text) => json!({ "rich_text": rich_text(text) }),
        PropertyValue::Date(at) => json!({ "date": { "start": at.to_rfc3339() } }),
        PropertyValue::Relation(ids) => json!({
            "relation": ids.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>()
        }),
        PropertyValue::Url(url) => json!({ "url": url }),
    }
}

/// Split text into rich text segments of at most [`MAX_TEXT_SEGMENT`] chars.
///
/// Empty text renders as an empty array, which Notion accepts as a cleared
/// value.
fn rich_text(text: &str) -> Vec<Value> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(MAX_TEXT_SEGMENT)
        .map(|chunk| {
            let content: String = chunk.iter().collect();
            json!({ "type": "text", "text": { "content": content } })
        })
        .collect()
}

/// Render a property filter as a Notion database-query filter.
pub fn filter_to_json(filter: &PropertyFilter) -> Value {
    match filter {
        PropertyFilter::NumberEquals { property, value } => json!({
            "property": property,
            "number": { "equals": value }
        }),
        PropertyFilter::RichTextEquals { property, value } => json!({
            "property": property,
            "rich_text": { "equals": value }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_properties_render_typed_values() {
        let mut bag = PropertyBag::new();
        bag.insert("Title".to_string(), PropertyValue::Title("[T-1] Fix".to_string()));
        bag.insert(
            "Date".to_string(),
            PropertyValue::Date(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()),
        );
        bag.insert(
            "Task".to_string(),
            PropertyValue::Relation(vec!["page-1".to_string()]),
        );
        bag.insert(
            "URL".to_string(),
            PropertyValue::Url("https://github.com/o/r/commit/abc".to_string()),
        );

        let json = Value::Object(properties_to_json(&bag));
        assert_eq!(json["Title"]["title"][0]["text"]["content"], "[T-1] Fix");
        assert_eq!(json["Date"]["date"]["start"], "2024-01-15T10:30:00+00:00");
        assert_eq!(json["Task"]["relation"][0]["id"], "page-1");
        assert_eq!(json["URL"]["url"], "https://github.com/o/r/commit/abc");
    }

    #[test]
    fn test_long_rich_text_is_split_into_segments() {
        let text = "é".repeat(MAX_TEXT_SEGMENT * 2 + 5);
        let segments = rich_text(&text);
        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments[0]["text"]["content"].as_str().unwrap().chars().count(),
            MAX_TEXT_SEGMENT
        );
        assert_eq!(
            segments[2]["text"]["content"].as_str().unwrap().chars().count(),
            5
        );
    }

    #[test]
    fn test_empty_rich_text_is_empty_array() {
        assert!(rich_text("").is_empty());
    }

    #[test]
    fn test_number_filter() {
        let filter = PropertyFilter::NumberEquals {
            property: "ID".to_string(),
            value: 42,
        };
        assert_eq!(
            filter_to_json(&filter),
            json!({ "property": "ID", "number": { "equals": 42 } })
        );
    }

    #[test]
    fn test_rich_text_filter() {
        let filter = PropertyFilter::RichTextEquals {
            property: "Commit".to_string(),
            value: "abc123".to_string(),
        };
        assert_eq!(
            filter_to_json(&filter),
            json!({ "property": "Commit", "rich_text": { "equals": "abc123" } })
        );
    }

    #[test]
    fn test_create_page_with_icon() {
        let req = CreatePageRequest {
            database_id: "db".to_string(),
            properties: PropertyBag::new(),
            icon: Some("🔨".to_string()),
        };
        let body = serde_json::to_value(NotionCreatePage::from(&req)).unwrap();
        assert_eq!(body["parent"]["database_id"], "db");
        assert_eq!(body["icon"]["type"], "emoji");
        assert_eq!(body["icon"]["emoji"], "🔨");
    }

    #[test]
    fn test_create_page_without_icon_omits_field() {
        let req = CreatePageRequest {
            database_id: "db".to_string(),
            properties: PropertyBag::new(),
            icon: None,
        };
        let body = serde_json::to_value(NotionCreatePage::from(&req)).unwrap();
        assert!(body.get("icon").is_none());
    }

    #[test]
    fn test_page_summary_from_database_parent() {
        let json = r#"{
            "object": "page",
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "url": "https://www.notion.so/Task-598337872cf94fdf8782e53db20768a5",
            "parent": { "type": "database_id", "database_id": "d9824bdc-8445-4327-be8b-5b47500af6ce" },
            "properties": {}
        }"#;
        let page: NotionPage = serde_json::from_str(json).unwrap();
        let summary = PageSummary::from(page);
        assert_eq!(summary.id, "59833787-2cf9-4fdf-8782-e53db20768a5");
        assert_eq!(
            summary.parent_database_id.as_deref(),
            Some("d9824bdc-8445-4327-be8b-5b47500af6ce")
        );
    }

    #[test]
    fn test_page_summary_from_page_parent() {
        let json = r#"{
            "id": "p2",
            "parent": { "type": "page_id", "page_id": "p1" }
        }"#;
        let page: NotionPage = serde_json::from_str(json).unwrap();
        assert!(PageSummary::from(page).parent_database_id.is_none());
    }
}
