//! Workspace Hierarchy
//!
//! Rebuilds parent → children relationships from the flat object list that a
//! full-workspace search returns. Built fresh on every fetch and never
//! mutated afterwards.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use super::object::{ObjectKind, ParentRef, WorkspaceObject};

/// Parent → children index over one search result
#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    pub total_objects: usize,
    pub total_pages: usize,
    pub total_databases: usize,
    /// Pages without a page/database parent, in input order
    pub top_level: Vec<WorkspaceObject>,
    /// Page children keyed by parent id
    pub pages_by_parent: BTreeMap<String, Vec<WorkspaceObject>>,
    /// Database children keyed by parent page id; `None` collects databases
    /// whose parent is not a page
    pub databases_by_parent: BTreeMap<Option<String>, Vec<WorkspaceObject>>,
}

impl HierarchyIndex {
    /// Build the index from raw search results
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        Self::build(values.into_iter().map(WorkspaceObject::from_value))
    }

    /// Build the index. Nothing is dropped or deduplicated.
    pub fn build(objects: impl IntoIterator<Item = WorkspaceObject>) -> Self {
        let mut index = HierarchyIndex::default();
        let mut databases = Vec::new();

        for object in objects {
            index.total_objects += 1;
            match object.kind {
                ObjectKind::Page => {
                    index.total_pages += 1;
                    index.insert_page(object);
                }
                ObjectKind::Database => {
                    index.total_databases += 1;
                    databases.push(object);
                }
                ObjectKind::Other(_) => {}
            }
        }

        for database in databases {
            index.insert_database(database);
        }

        debug!(
            "Built hierarchy: {} objects, {} pages ({} top-level), {} databases",
            index.total_objects,
            index.total_pages,
            index.top_level.len(),
            index.total_databases
        );

        index
    }

    fn insert_page(&mut self, page: WorkspaceObject) {
        match page.parent.id() {
            Some(parent_id) => self
                .pages_by_parent
                .entry(parent_id.to_string())
                .or_default()
                .push(page),
            None => self.top_level.push(page),
        }
    }

    fn insert_database(&mut self, database: WorkspaceObject) {
        let key = match &database.parent {
            ParentRef::Page(id) => Some(id.clone()),
            _ => None,
        };
        self.databases_by_parent
            .entry(key)
            .or_default()
            .push(database);
    }

    /// Direct page children of `parent_id`
    pub fn child_pages(&self, parent_id: &str) -> &[WorkspaceObject] {
        self.pages_by_parent
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Direct database children of the page `parent_id`
    pub fn child_databases(&self, parent_id: &str) -> &[WorkspaceObject] {
        self.databases_by_parent
            .get(&Some(parent_id.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Databases whose parent is not a page
    pub fn unparented_databases(&self) -> &[WorkspaceObject] {
        self.databases_by_parent
            .get(&None)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of pages placed in parent buckets
    pub fn bucketed_page_count(&self) -> usize {
        self.pages_by_parent.values().map(Vec::len).sum()
    }

    /// Number of databases placed in parent buckets
    pub fn bucketed_database_count(&self) -> usize {
        self.databases_by_parent.values().map(Vec::len).sum()
    }
}
