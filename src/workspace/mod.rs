//! Workspace Integration
//!
//! Notion API client plus the data shaping done on its results:
//! typed objects, the parent/child hierarchy, and the DanceSport locator.

pub mod client;
pub mod hierarchy;
pub mod locator;
pub mod object;

pub use client::{WorkspaceClient, paragraph_block, results};
pub use hierarchy::HierarchyIndex;
pub use locator::{DanceCategoryEntry, DanceSportContent, find_dancesport_content};
pub use object::{ObjectKind, ParentRef, WorkspaceObject, extract_title, plain_text};
