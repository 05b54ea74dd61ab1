//! Global Constants
//!
//! Centralized constants for remote services, placeholders, and the
//! DanceSport workspace layout.

/// Workspace (Notion) API constants
pub mod workspace {
    /// Default API base URL
    pub const DEFAULT_API_BASE: &str = "https://api.notion.com/v1";

    /// Protocol version sent with every request
    pub const API_VERSION: &str = "2022-06-28";

    /// Default (and maximum) page size for search requests
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    /// Request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Service name used in error messages
    pub const SERVICE: &str = "notion";
}

/// Text generation (Gemini) constants
pub mod llm {
    /// Default API base URL
    pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Default model
    pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

    /// Sampling temperature
    pub const TEMPERATURE: f32 = 0.7;

    /// Nucleus sampling threshold
    pub const TOP_P: f32 = 0.95;

    /// Maximum output tokens per call
    pub const MAX_OUTPUT_TOKENS: u32 = 2048;

    /// Request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Service name used in error messages
    pub const SERVICE: &str = "gemini";
}

/// Title placeholders
pub mod titles {
    pub const UNTITLED: &str = "Untitled";
    pub const UNTITLED_DATABASE: &str = "Untitled Database";
}

/// Markers used to locate DanceSport content in the workspace
pub mod layout {
    /// Substring identifying the root page (case-insensitive)
    pub const ROOT_MARKER: &str = "dancesport";

    /// Substrings identifying category stores (case-insensitive)
    pub const CATEGORY_MARKERS: [&str; 2] = ["fundamental", "open"];
}

/// User-facing placeholder messages
pub mod messages {
    /// Prefix of every text-generation failure
    pub const GENERATION_ERROR_PREFIX: &str = "Error generating response";

    pub const NO_DANCE_DATA: &str = "No dance data available for analysis.";

    pub const UNKNOWN_COMPARISON: &str =
        "I don't have information about one or both of these dances.";
}
