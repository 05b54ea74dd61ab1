//! CLI Common Utilities
//!
//! Shared initialization and context management for CLI commands.

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::debug;

use crate::ai::ProgressTracker;
use crate::config::{Config, ConfigLoader};
use crate::session::Session;
use crate::types::{CoachError, Result};
use crate::workspace::{DanceCategoryEntry, WorkspaceObject};

/// Command execution context
///
/// Loaded configuration plus a connected session. Commands that work on a
/// dance store call `load_workspace()` before selecting one.
pub struct CommandContext {
    pub config: Config,
    pub session: Session,
}

impl CommandContext {
    /// Load config and connect to both services
    pub async fn connect() -> Result<Self> {
        let config = ConfigLoader::load()?;
        let session = Session::connect(&config).await?;
        Ok(Self { config, session })
    }

    /// Connect and fetch the workspace hierarchy
    pub async fn load_workspace() -> Result<Self> {
        let mut ctx = Self::connect().await?;
        ctx.session.load_workspace().await?;
        Ok(ctx)
    }

    /// Selected dance store, cloned so the session can be borrowed mutably afterwards
    pub fn select(&self, query: &str) -> Result<DanceCategoryEntry> {
        let entry = self.session.select(query)?.clone();
        debug!("Selected {} ({})", entry.label(), entry.database_id);
        Ok(entry)
    }

    /// Records of a dance store
    pub async fn figures(&self, entry: &DanceCategoryEntry) -> Result<Vec<WorkspaceObject>> {
        ProgressTracker::new(self.session.client())
            .figures(&entry.database_id)
            .await
    }

    /// Where saved routines go
    pub fn routine_dir(&self) -> PathBuf {
        self.config.coach.routine_dir.clone()
    }
}

/// `{dance}_routine_{YYYYMMDD}.txt`, with path separators replaced
pub fn routine_file_name(dance: &str, date: NaiveDate) -> String {
    let dance: String = dance
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}_routine_{}.txt", dance, date.format("%Y%m%d"))
}

/// Figure in a dance store by exact title, then by partial title (case-insensitive)
pub fn find_figure<'a>(figures: &'a [WorkspaceObject], title: &str) -> Result<&'a WorkspaceObject> {
    let needle = title.trim().to_lowercase();
    figures
        .iter()
        .find(|f| f.title.to_lowercase() == needle)
        .or_else(|| {
            figures
                .iter()
                .find(|f| f.title.to_lowercase().contains(&needle))
        })
        .ok_or_else(|| CoachError::Selection(title.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn figure(id: &str, title: &str) -> WorkspaceObject {
        WorkspaceObject::from_value(json!({
            "object": "page",
            "id": id,
            "properties": {"Name": {"type": "title", "title": [{"plain_text": title}]}}
        }))
    }

    #[test]
    fn test_routine_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(routine_file_name("Rumba", date), "Rumba_routine_20240309.txt");
        assert_eq!(
            routine_file_name("Cha Cha/Open", date),
            "Cha Cha_Open_routine_20240309.txt"
        );
    }

    #[test]
    fn test_find_figure() {
        let figures = vec![
            figure("1", "Spot Turn to Right"),
            figure("2", "Spot Turn"),
            figure("3", "New York"),
        ];
        assert_eq!(find_figure(&figures, "spot turn").unwrap().id, "2");
        assert_eq!(find_figure(&figures, "york").unwrap().id, "3");
        assert!(matches!(
            find_figure(&figures, "Fan"),
            Err(CoachError::Selection(_))
        ));
    }
}
