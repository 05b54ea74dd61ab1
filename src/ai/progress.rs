//! Practice Statistics
//!
//! Summarizes the records of one dance store: how many figures are logged
//! and when the most recent one was created.

use serde::Serialize;
use tracing::debug;

use crate::types::Result;
use crate::workspace::{WorkspaceClient, WorkspaceObject, results};

/// One logged figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureSummary {
    pub title: String,
    pub created: Option<String>,
    pub id: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PracticeStats {
    pub total_figures: usize,
    pub figures: Vec<FigureSummary>,
    /// Latest creation time among the figures
    pub last_updated: Option<String>,
}

impl PracticeStats {
    pub fn from_records(records: &[WorkspaceObject]) -> Self {
        let figures: Vec<FigureSummary> = records
            .iter()
            .map(|record| FigureSummary {
                title: record.title.clone(),
                created: record.created_time.clone(),
                id: record.id.clone(),
                url: record.url.clone(),
            })
            .collect();

        // Parseable times outrank unparseable ones; raw text breaks ties
        let last_updated = records
            .iter()
            .filter(|r| r.created_time.is_some())
            .max_by_key(|r| (r.created_at(), r.created_time.as_deref()))
            .and_then(|r| r.created_time.clone());

        Self {
            total_figures: figures.len(),
            figures,
            last_updated,
        }
    }
}

/// Reads practice statistics from the workspace
pub struct ProgressTracker<'a> {
    client: &'a WorkspaceClient,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(client: &'a WorkspaceClient) -> Self {
        Self { client }
    }

    /// Records of one dance store as typed objects
    pub async fn figures(&self, database_id: &str) -> Result<Vec<WorkspaceObject>> {
        let response = self.client.query_database(database_id, None, None).await?;
        let records: Vec<WorkspaceObject> = results(response)
            .into_iter()
            .map(WorkspaceObject::from_value)
            .collect();
        debug!("Dance store {} has {} records", database_id, records.len());
        Ok(records)
    }

    pub async fn practice_stats(&self, database_id: &str) -> Result<PracticeStats> {
        let records = self.figures(database_id).await?;
        Ok(PracticeStats::from_records(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn figure(id: &str, title: &str, created: Option<&str>) -> WorkspaceObject {
        let mut value = json!({
            "object": "page",
            "id": id,
            "url": format!("https://www.notion.so/{}", id),
            "properties": {"Figure": {"type": "title", "title": [{"plain_text": title}]}}
        });
        if let Some(created) = created {
            value["created_time"] = json!(created);
        }
        WorkspaceObject::from_value(value)
    }

    #[test]
    fn test_stats_empty() {
        let stats = PracticeStats::from_records(&[]);
        assert_eq!(stats, PracticeStats::default());
    }

    #[test]
    fn test_stats_latest_creation_time() {
        let stats = PracticeStats::from_records(&[
            figure("a", "Basic Movement", Some("2024-03-01T10:00:00.000Z")),
            figure("b", "New York", Some("2024-05-12T08:30:00.000Z")),
            figure("c", "Spot Turn", None),
            figure("d", "Hand to Hand", Some("2024-04-20T18:00:00.000Z")),
        ]);

        assert_eq!(stats.total_figures, 4);
        assert_eq!(stats.figures[1].title, "New York");
        assert_eq!(stats.figures[2].created, None);
        assert_eq!(
            stats.figures[0].url.as_deref(),
            Some("https://www.notion.so/a")
        );
        assert_eq!(
            stats.last_updated.as_deref(),
            Some("2024-05-12T08:30:00.000Z")
        );
    }

    #[test]
    fn test_stats_latest_ignores_record_order() {
        let records = vec![
            figure("a", "Basic Movement", Some("last tuesday")),
            figure("b", "New York", Some("2024-05-12T08:30:00.000Z")),
            figure("c", "Spot Turn", Some("2024-05-12T09:30:00+01:00")),
            figure("d", "Hand to Hand", Some("2024-04-20T18:00:00.000Z")),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = PracticeStats::from_records(&records).last_updated;
        let backward = PracticeStats::from_records(&reversed).last_updated;

        // Same instant: raw text decides, independent of input order
        assert_eq!(forward.as_deref(), Some("2024-05-12T09:30:00+01:00"));
        assert_eq!(forward, backward);
    }

    #[tokio::test]
    async fn test_practice_stats_propagates_query_failure() {
        let config = crate::config::WorkspaceConfig {
            token: Some("t".to_string()),
            api_base: "http://127.0.0.1:9".to_string(),
            timeout_secs: 5,
            ..crate::config::WorkspaceConfig::default()
        };
        let client = WorkspaceClient::new(&config).unwrap();

        let err = ProgressTracker::new(&client)
            .practice_stats("db1")
            .await
            .unwrap_err();
        assert_eq!(err.category(), Some(crate::types::ErrorCategory::Network));
    }

    #[test]
    fn test_stats_without_any_timestamps() {
        let stats = PracticeStats::from_records(&[figure("a", "Box", None)]);
        assert_eq!(stats.total_figures, 1);
        assert!(stats.last_updated.is_none());
    }
}
