//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/dancesport/) and project (.dancesport/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{llm, workspace};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Workspace (Notion) API settings
    pub workspace: WorkspaceConfig,

    /// Text generation settings
    pub llm: LlmConfig,

    /// Coaching defaults
    pub coach: CoachConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            workspace: WorkspaceConfig::default(),
            llm: LlmConfig::default(),
            coach: CoachConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `CoachError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(crate::types::CoachError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if !(self.llm.top_p > 0.0 && self.llm.top_p <= 1.0) {
            return Err(crate::types::CoachError::Config(format!(
                "LLM top_p must be in (0.0, 1.0], got {}",
                self.llm.top_p
            )));
        }

        if self.llm.max_output_tokens == 0 {
            return Err(crate::types::CoachError::Config(
                "LLM max_output_tokens must be greater than 0".to_string(),
            ));
        }

        if self.llm.timeout_secs == 0 || self.workspace.timeout_secs == 0 {
            return Err(crate::types::CoachError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.workspace.page_size == 0 || self.workspace.page_size > workspace::DEFAULT_PAGE_SIZE
        {
            return Err(crate::types::CoachError::Config(format!(
                "Workspace page_size must be between 1 and {}, got {}",
                workspace::DEFAULT_PAGE_SIZE,
                self.workspace.page_size
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Workspace Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// API base URL
    pub api_base: String,

    /// Value of the protocol version header
    pub api_version: String,

    /// Page size for search requests (max 100)
    pub page_size: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Integration token. Never serialized to output.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

impl std::fmt::Debug for WorkspaceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceConfig")
            .field("api_base", &self.api_base)
            .field("api_version", &self.api_version)
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            api_base: workspace::DEFAULT_API_BASE.to_string(),
            api_version: workspace::API_VERSION.to_string(),
            page_size: workspace::DEFAULT_PAGE_SIZE,
            timeout_secs: workspace::DEFAULT_TIMEOUT_SECS,
            token: None,
        }
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,

    /// API base URL
    pub api_base: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus sampling threshold
    pub top_p: f32,

    /// Maximum tokens to generate per call
    pub max_output_tokens: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// API key. Never serialized to output.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: llm::DEFAULT_MODEL.to_string(),
            api_base: llm::DEFAULT_API_BASE.to_string(),
            temperature: llm::TEMPERATURE,
            top_p: llm::TOP_P,
            max_output_tokens: llm::MAX_OUTPUT_TOKENS,
            timeout_secs: llm::DEFAULT_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

// =============================================================================
// Coach Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    /// Skill level used when none is given on the command line
    pub default_skill_level: SkillLevel,

    /// Directory where saved practice routines are written
    pub routine_dir: PathBuf,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            default_skill_level: SkillLevel::Beginner,
            routine_dir: PathBuf::from("."),
        }
    }
}

/// Student skill level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillLevel::Beginner => write!(f, "beginner"),
            SkillLevel::Intermediate => write!(f, "intermediate"),
            SkillLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            _ => Err(format!(
                "Unknown skill level: {}. Valid values: beginner, intermediate, advanced",
                s
            )),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
