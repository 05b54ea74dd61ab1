//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/dancesport/config.toml)
//! 3. Project config (.dancesport/config.toml)
//! 4. Environment variables (DANCESPORT_*, NOTION_TOKEN, GOOGLE_API_KEY)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::{API_KEY_ENV, ConfigLoader, TOKEN_ENV};
pub use types::*;
