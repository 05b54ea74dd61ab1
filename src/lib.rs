//! DanceSport Coach - AI practice assistant for DanceSport students
//!
//! Reads a student's practice log from a Notion workspace, locates the
//! DanceSport content in it, and asks Gemini for coaching text: progress
//! analysis, practice routines, figure comments and answers to questions.
//!
//! ## Quick Start
//!
//! ```ignore
//! use dancesport_coach::{ConfigLoader, ProgressTracker, Session};
//!
//! let config = ConfigLoader::load()?;
//! let mut session = Session::connect(&config).await?;
//! session.load_workspace().await?;
//!
//! let entry = session.select("1")?.clone();
//! let figures = ProgressTracker::new(session.client()).figures(&entry.database_id).await?;
//! let analysis = session.coach_mut().analyze_progress(&figures).await;
//! ```
//!
//! ## Modules
//!
//! - [`workspace`]: Notion client, hierarchy builder, DanceSport locator
//! - [`ai`]: Gemini provider, prompts, knowledge table, coach agent
//! - [`session`]: connected state for one run
//! - [`config`]: layered configuration
//! - [`cli`]: command handlers for the `dancesport` binary

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod session;
pub mod types;
pub mod workspace;

// Configuration
pub use config::{CoachConfig, Config, ConfigLoader, LlmConfig, SkillLevel, WorkspaceConfig};

// Error Types
pub use types::error::{ApiError, CoachError, ErrorCategory, Result, ResultExt};

// Session
pub use session::{LoadedWorkspace, Session};

// Workspace
pub use workspace::{
    DanceCategoryEntry, DanceSportContent, HierarchyIndex, WorkspaceClient, WorkspaceObject,
    extract_title, find_dancesport_content,
};

// AI
pub use ai::{
    ChatMessage, ChatRole, CoachAgent, GeminiProvider, LlmProvider, LlmResponse, PracticeStats,
    ProgressTracker, SharedProvider,
};
