//! AI Integration Layer
//!
//! Text-generation provider, coach prompts, dance knowledge and the coach
//! agent built on top of them.

pub mod agent;
pub mod knowledge;
pub mod progress;
pub mod prompt;
pub mod provider;

pub use agent::{ChatMessage, ChatRole, CoachAgent};
pub use knowledge::DanceInfo;
pub use progress::{FigureSummary, PracticeStats, ProgressTracker};
pub use prompt::{PromptBuilder, PromptSection, PromptTemplates};
pub use provider::{
    GeminiProvider, LlmProvider, LlmResponse, ResponseMetadata, ResponseTiming, SharedProvider,
    TokenUsage, create_provider, with_context,
};
