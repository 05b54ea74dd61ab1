//! Coaching Session
//!
//! Owns everything a run of the assistant needs: the workspace client, the
//! coach, the identity returned at connect time and the hierarchy loaded
//! from the last workspace fetch.

use serde_json::Value;
use tracing::{debug, info};

use crate::ai::{CoachAgent, SharedProvider, create_provider};
use crate::config::Config;
use crate::types::{CoachError, Result};
use crate::workspace::{
    DanceCategoryEntry, DanceSportContent, HierarchyIndex, WorkspaceClient,
    find_dancesport_content, results,
};

/// Hierarchy and DanceSport content from one workspace fetch
#[derive(Debug, Clone)]
pub struct LoadedWorkspace {
    pub index: HierarchyIndex,
    pub content: DanceSportContent,
}

impl LoadedWorkspace {
    pub fn from_values(values: Vec<Value>) -> Self {
        let index = HierarchyIndex::from_values(values);
        let content = find_dancesport_content(&index);
        Self { index, content }
    }
}

#[derive(Debug)]
pub struct Session {
    client: WorkspaceClient,
    coach: CoachAgent,
    identity: Value,
    workspace: Option<LoadedWorkspace>,
}

impl Session {
    /// Validate the workspace token and build the coach
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = WorkspaceClient::new(&config.workspace)?;
        let provider = create_provider(&config.llm)?;

        let identity = client.get_integration_info().await.map_err(|e| {
            CoachError::NotConnected(format!("Workspace credentials rejected: {}", e))
        })?;

        let session = Self::from_parts(client, provider, identity);
        info!("Connected to workspace as {}", session.bot_name());
        Ok(session)
    }

    /// Assemble a session from already-validated parts
    pub fn from_parts(client: WorkspaceClient, provider: SharedProvider, identity: Value) -> Self {
        Self {
            client,
            coach: CoachAgent::new(provider),
            identity,
            workspace: None,
        }
    }

    pub fn client(&self) -> &WorkspaceClient {
        &self.client
    }

    pub fn coach(&self) -> &CoachAgent {
        &self.coach
    }

    pub fn coach_mut(&mut self) -> &mut CoachAgent {
        &mut self.coach
    }

    /// Identity payload of the integration bot
    pub fn identity(&self) -> &Value {
        &self.identity
    }

    pub fn bot_name(&self) -> &str {
        self.identity
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
    }

    /// Fetch all shared objects, rebuild the hierarchy and locate DanceSport content
    pub async fn load_workspace(&mut self) -> Result<&LoadedWorkspace> {
        let response = self
            .client
            .search_all(None, self.client.page_size())
            .await?;
        let values = results(response);
        debug!("Search returned {} objects", values.len());

        Ok(self.install(LoadedWorkspace::from_values(values)))
    }

    /// Replace the loaded workspace
    pub fn install(&mut self, workspace: LoadedWorkspace) -> &LoadedWorkspace {
        self.workspace.insert(workspace)
    }

    pub fn workspace(&self) -> Option<&LoadedWorkspace> {
        self.workspace.as_ref()
    }

    /// Pick a dance store by 1-based index or title
    pub fn select(&self, query: &str) -> Result<&DanceCategoryEntry> {
        let workspace = self
            .workspace
            .as_ref()
            .ok_or(CoachError::WorkspaceNotLoaded)?;
        workspace
            .content
            .select(query)
            .ok_or_else(|| CoachError::Selection(query.to_string()))
    }

    /// Drop loaded state and the conversation log
    pub fn reset(&mut self) {
        self.workspace = None;
        self.coach.clear_history();
    }
}
