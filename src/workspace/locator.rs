//! DanceSport Content Locator
//!
//! Finds the "DanceSport" root page among the top-level pages, then walks
//! exactly two levels of databases below it: category stores whose title
//! mentions "fundamental" or "open", and the dance stores under those.
//! Content nested any deeper is not searched.

use serde::Serialize;
use tracing::debug;

use super::hierarchy::HierarchyIndex;
use super::object::WorkspaceObject;
use crate::constants::layout::{CATEGORY_MARKERS, ROOT_MARKER};

/// One dance store below a category store
#[derive(Debug, Clone, Serialize)]
pub struct DanceCategoryEntry {
    pub category: String,
    pub dance: String,
    pub database_id: String,
    #[serde(skip)]
    pub database: WorkspaceObject,
}

impl DanceCategoryEntry {
    /// "Category - Dance" label
    pub fn label(&self) -> String {
        format!("{} - {}", self.category, self.dance)
    }
}

/// Result of locating DanceSport content; an absent root is a valid result
#[derive(Debug, Clone, Default, Serialize)]
pub struct DanceSportContent {
    pub root: Option<WorkspaceObject>,
    pub categories: Vec<DanceCategoryEntry>,
}

impl DanceSportContent {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Pick an entry by 1-based index or by case-insensitive label/dance match
    pub fn select(&self, query: &str) -> Option<&DanceCategoryEntry> {
        let query = query.trim();
        if let Ok(index) = query.parse::<usize>()
            && let Some(entry) = index.checked_sub(1).and_then(|i| self.categories.get(i))
        {
            return Some(entry);
        }

        let needle = query.to_lowercase();
        self.categories
            .iter()
            .find(|entry| entry.dance.to_lowercase() == needle)
            .or_else(|| {
                self.categories
                    .iter()
                    .find(|entry| entry.label().to_lowercase().contains(&needle))
            })
    }
}

/// Locate the DanceSport root page and its dance stores
pub fn find_dancesport_content(index: &HierarchyIndex) -> DanceSportContent {
    let Some(root) = index
        .top_level
        .iter()
        .find(|page| page.title.to_lowercase().contains(ROOT_MARKER))
    else {
        debug!("No top-level page mentions '{}'", ROOT_MARKER);
        return DanceSportContent::default();
    };

    let mut categories = Vec::new();
    for category in index.child_databases(&root.id) {
        let title = category.title.to_lowercase();
        if !CATEGORY_MARKERS.iter().any(|marker| title.contains(marker)) {
            debug!("Skipping category store '{}'", category.title);
            continue;
        }

        for dance in index.child_databases(&category.id) {
            categories.push(DanceCategoryEntry {
                category: category.title.clone(),
                dance: dance.title.clone(),
                database_id: dance.id.clone(),
                database: dance.clone(),
            });
        }
    }

    debug!(
        "Found DanceSport root '{}' with {} dance stores",
        root.title,
        categories.len()
    );

    DanceSportContent {
        root: Some(root.clone()),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn page(id: &str, title: &str) -> Value {
        json!({
            "object": "page",
            "id": id,
            "parent": {"type": "workspace", "workspace": true},
            "properties": {"title": {"type": "title", "title": [{"plain_text": title}]}}
        })
    }

    fn database(id: &str, title: &str, parent_page: &str) -> Value {
        json!({
            "object": "database",
            "id": id,
            "parent": {"type": "page_id", "page_id": parent_page},
            "title": [{"plain_text": title}]
        })
    }

    #[test]
    fn test_no_root_is_empty_result() {
        let index = HierarchyIndex::from_values(vec![page("n", "Notes")]);
        let content = find_dancesport_content(&index);
        assert!(content.root.is_none());
        assert!(content.categories.is_empty());
    }

    #[test]
    fn test_root_match_is_case_insensitive_and_partial() {
        let index = HierarchyIndex::from_values(vec![
            page("n", "Notes"),
            page("r", "My DanceSport Hub"),
            page("r2", "DANCESPORT archive"),
        ]);
        let content = find_dancesport_content(&index);
        assert_eq!(content.root.unwrap().id, "r");
    }

    #[test]
    fn test_single_open_category() {
        let index = HierarchyIndex::from_values(vec![
            page("R", "DanceSport"),
            database("C", "Open Rumba", "R"),
            database("D", "Rumba", "C"),
        ]);

        let content = find_dancesport_content(&index);
        assert_eq!(content.categories.len(), 1);
        let entry = &content.categories[0];
        assert_eq!(entry.category, "Open Rumba");
        assert_eq!(entry.dance, "Rumba");
        assert_eq!(entry.database_id, "D");
        assert_eq!(entry.database.id, "D");
    }

    #[test]
    fn test_category_filtering_and_order() {
        let index = HierarchyIndex::from_values(vec![
            page("R", "DanceSport"),
            database("F", "Fundamental Cha Cha", "R"),
            database("A", "Advanced Technique", "R"),
            database("O", "Open Latin", "R"),
            database("f1", "Cha Cha", "F"),
            database("a1", "Drills", "A"),
            database("o1", "Rumba", "O"),
            database("o2", "Mambo", "O"),
        ]);

        let content = find_dancesport_content(&index);
        let labels: Vec<_> = content.categories.iter().map(|e| e.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Fundamental Cha Cha - Cha Cha",
                "Open Latin - Rumba",
                "Open Latin - Mambo"
            ]
        );
    }

    #[test]
    fn test_nested_root_is_not_found() {
        let nested = json!({
            "object": "page",
            "id": "deep",
            "parent": {"type": "page_id", "page_id": "top"},
            "properties": {"title": {"type": "title", "title": [{"plain_text": "DanceSport"}]}}
        });
        let index = HierarchyIndex::from_values(vec![page("top", "Home"), nested]);
        assert!(find_dancesport_content(&index).root.is_none());
    }

    #[test]
    fn test_root_without_categories() {
        let index = HierarchyIndex::from_values(vec![page("R", "DanceSport")]);
        let content = find_dancesport_content(&index);
        assert!(content.root.is_some());
        assert!(content.is_empty());
    }

    #[test]
    fn test_select_entry() {
        let index = HierarchyIndex::from_values(vec![
            page("R", "DanceSport"),
            database("F", "Fundamental Latin", "R"),
            database("f1", "Cha Cha", "F"),
            database("f2", "Rumba", "F"),
        ]);
        let content = find_dancesport_content(&index);

        assert_eq!(content.select("2").unwrap().database_id, "f2");
        assert_eq!(content.select("rumba").unwrap().database_id, "f2");
        assert_eq!(content.select("latin - cha").unwrap().database_id, "f1");
        assert!(content.select("0").is_none());
        assert!(content.select("3").is_none());
        assert!(content.select("tango").is_none());
    }

    #[test]
    fn test_select_numeric_title_falls_back_to_name() {
        let index = HierarchyIndex::from_values(vec![
            page("R", "DanceSport"),
            database("O", "Open", "R"),
            database("o1", "2", "O"),
        ]);
        let content = find_dancesport_content(&index);

        assert_eq!(content.select("1").unwrap().database_id, "o1");
        assert_eq!(content.select("2").unwrap().database_id, "o1");
        assert!(content.select("7").is_none());
    }
}
