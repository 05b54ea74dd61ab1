//! Workspace Objects
//!
//! Typed view over the page and database records returned by the workspace
//! API. The original JSON payload is kept alongside the modeled fields so
//! callers can still reach properties that are not modeled here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::constants::titles::{UNTITLED, UNTITLED_DATABASE};

/// Kind of a workspace record (`object` field)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Page,
    Database,
    Other(String),
}

impl ObjectKind {
    fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("page") => ObjectKind::Page,
            Some("database") => ObjectKind::Database,
            Some(other) => ObjectKind::Other(other.to_string()),
            None => ObjectKind::Other(String::new()),
        }
    }
}

/// Parent reference of a workspace record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ParentRef {
    Page(String),
    Database(String),
    /// Workspace root, block parent, or anything unsupported
    None,
}

impl ParentRef {
    /// Parse the `parent` descriptor: `{"type": "page_id", "page_id": "..."}`
    pub fn from_value(parent: Option<&Value>) -> Self {
        let Some(parent) = parent else {
            return ParentRef::None;
        };
        let id = |field: &str| parent.get(field).and_then(Value::as_str).map(str::to_string);

        match parent.get("type").and_then(Value::as_str) {
            Some("page_id") => id("page_id").map_or(ParentRef::None, ParentRef::Page),
            Some("database_id") => id("database_id").map_or(ParentRef::None, ParentRef::Database),
            _ => ParentRef::None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            ParentRef::Page(id) | ParentRef::Database(id) => Some(id),
            ParentRef::None => None,
        }
    }
}

/// A page or database returned by the workspace API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceObject {
    pub id: String,
    pub kind: ObjectKind,
    pub title: String,
    pub created_time: Option<String>,
    pub url: Option<String>,
    pub parent: ParentRef,
    /// Raw `parent.type` tag ("page_id", "workspace", "block_id", ...)
    pub parent_type: Option<String>,
    /// Original record
    #[serde(skip)]
    pub raw: Value,
}

impl WorkspaceObject {
    /// Build the typed view. Never fails: missing fields become `None`/empty.
    pub fn from_value(raw: Value) -> Self {
        let str_field = |field: &str| raw.get(field).and_then(Value::as_str).map(str::to_string);

        let parent_value = raw.get("parent");
        Self {
            id: str_field("id").unwrap_or_default(),
            kind: ObjectKind::from_tag(raw.get("object").and_then(Value::as_str)),
            title: extract_title(&raw),
            created_time: str_field("created_time"),
            url: str_field("url"),
            parent: ParentRef::from_value(parent_value),
            parent_type: parent_value
                .and_then(|p| p.get("type"))
                .and_then(Value::as_str)
                .map(str::to_string),
            raw,
        }
    }

    pub fn is_page(&self) -> bool {
        self.kind == ObjectKind::Page
    }

    /// Creation time parsed as RFC 3339
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc))
    }

    /// Property map of a page record
    pub fn properties(&self) -> Option<&serde_json::Map<String, Value>> {
        self.raw.get("properties").and_then(Value::as_object)
    }
}

/// Display title of a page or database record.
///
/// Pages take the first property typed `"title"`; databases read their own
/// `title` run list. Falls back to `"Untitled"` / `"Untitled Database"`.
pub fn extract_title(obj: &Value) -> String {
    match obj.get("object").and_then(Value::as_str) {
        Some("page") => obj
            .get("properties")
            .and_then(Value::as_object)
            .and_then(|props| {
                props
                    .values()
                    .find(|prop| prop.get("type").and_then(Value::as_str) == Some("title"))
            })
            .and_then(|prop| first_run_text(prop.get("title"), UNTITLED))
            .unwrap_or_else(|| UNTITLED.to_string()),
        Some("database") => first_run_text(obj.get("title"), UNTITLED_DATABASE)
            .unwrap_or_else(|| UNTITLED_DATABASE.to_string()),
        _ => UNTITLED.to_string(),
    }
}

/// Plain text of the first run, `None` when the run list is absent or empty
fn first_run_text(runs: Option<&Value>, fallback: &str) -> Option<String> {
    let first = runs?.as_array()?.first()?;
    Some(
        first
            .get("plain_text")
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string(),
    )
}

/// Concatenated `plain_text` of a rich-text run list
pub fn plain_text(runs: Option<&Value>) -> String {
    runs.and_then(Value::as_array)
        .map(|runs| {
            runs.iter()
                .filter_map(|run| run.get("plain_text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}
