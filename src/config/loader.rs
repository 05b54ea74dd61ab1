//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/dancesport/config.toml)
//! 3. Project config (.dancesport/config.toml)
//! 4. Environment variables (DANCESPORT_* prefix, `__` between sections)
//!
//! Credentials additionally fall back to `NOTION_TOKEN` and `GOOGLE_API_KEY`.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use super::types::Config;
use crate::types::{CoachError, Result, ResultExt};

/// Environment variable holding the workspace integration token
pub const TOKEN_ENV: &str = "NOTION_TOKEN";

/// Environment variable holding the text generation API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // DANCESPORT_LLM__MODEL -> llm.model
        figment = figment.merge(Env::prefixed("DANCESPORT_").split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| CoachError::Config(format!("Configuration error: {}", e)))?;

        let config = Self::resolve_credentials(config, |key| env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| CoachError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Fill missing credentials from the conventional environment variables
    pub fn resolve_credentials<F>(mut config: Config, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        if config.workspace.token.is_none() {
            config.workspace.token = lookup(TOKEN_ENV).filter(|v| !v.trim().is_empty());
        }
        if config.llm.api_key.is_none() {
            config.llm.api_key = lookup(API_KEY_ENV).filter(|v| !v.trim().is_empty());
        }
        config
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/dancesport/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("dancesport"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(".dancesport")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration
    pub fn show_config(format: &str) -> Result<()> {
        let config = Self::load()?;

        match format {
            "json" => println!("{}", serde_json::to_string_pretty(&config)?),
            "yaml" => print!("{}", serde_yaml::to_string(&config)?),
            _ => println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| CoachError::Config(e.to_string()))?
            ),
        }

        Ok(())
    }

    /// Edit config file with default editor
    pub fn edit_config(global: bool) -> Result<()> {
        let path = if global {
            Self::global_config_path().ok_or_else(|| {
                CoachError::Config("Cannot determine global config path".to_string())
            })?
        } else {
            Self::project_config_path()
        };

        if !path.exists() {
            println!("Config file does not exist: {}", path.display());
            println!(
                "Run: dancesport config init {}",
                if global { "--global" } else { "" }
            );
            return Ok(());
        }

        let editor = env::var("EDITOR").unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "vi".to_string()
            }
        });

        let status = Command::new(&editor).arg(&path).status().map_err(|e| {
            CoachError::Config(format!("Failed to launch editor {}: {}", editor, e))
        })?;

        if !status.success() {
            return Err(CoachError::Config("Editor exited with error".to_string()));
        }

        println!("Config saved: {}", path.display());
        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            CoachError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::write_default(&global_dir, force)?;
        Ok(global_dir)
    }

    /// Initialize project configuration
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let project_dir = Self::project_dir();
        Self::write_default(&project_dir, force)?;
        Ok(project_dir)
    }

    /// Write the default config file into `dir`, keeping an existing one unless forced
    pub fn write_default(dir: &Path, force: bool) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(format!("Failed to create {}", dir.display()))?;

        let config_path = dir.join("config.toml");
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_config())?;
            info!("Created config: {}", config_path.display());
        } else {
            info!("Config exists: {}", config_path.display());
        }
        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Default config content (TOML)
    fn default_config() -> String {
        r#"# DanceSport Coach Configuration
# Tokens can also be provided through NOTION_TOKEN and GOOGLE_API_KEY.

version = "1.0"

[workspace]
api_base = "https://api.notion.com/v1"
page_size = 100
# token = "secret_..."

[llm]
provider = "gemini"
model = "gemini-2.0-flash-exp"
temperature = 0.7
top_p = 0.95
max_output_tokens = 2048
# api_key = "..."

[coach]
default_skill_level = "beginner"
routine_dir = "."
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SkillLevel;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_file_parses() {
        let temp_dir = TempDir::new().unwrap();
        let path = ConfigLoader::write_default(temp_dir.path(), false).unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.model, "gemini-2.0-flash-exp");
        assert_eq!(config.coach.default_skill_level, SkillLevel::Beginner);
        assert!(config.workspace.token.is_none());
    }

    #[test]
    fn test_load_from_file_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[llm]\nmodel = \"gemini-1.5-pro\"\n\n[coach]\ndefault_skill_level = \"advanced\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.llm.model, "gemini-1.5-pro");
        assert_eq!(config.coach.default_skill_level, SkillLevel::Advanced);
        assert_eq!(config.llm.top_p, 0.95);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[llm]\ntemperature = 9.0\n").unwrap();

        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn test_write_default_keeps_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "version = \"custom\"\n").unwrap();

        ConfigLoader::write_default(temp_dir.path(), false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = \"custom\"\n");

        ConfigLoader::write_default(temp_dir.path(), true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[workspace]"));
    }

    #[test]
    fn test_resolve_credentials_from_lookup() {
        let config = ConfigLoader::resolve_credentials(Config::default(), |key| match key {
            TOKEN_ENV => Some("secret_token".to_string()),
            API_KEY_ENV => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.workspace.token.as_deref(), Some("secret_token"));
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_resolve_credentials_keeps_configured_values() {
        let mut config = Config::default();
        config.llm.api_key = Some("from-file".to_string());

        let config = ConfigLoader::resolve_credentials(config, |_| Some("from-env".to_string()));
        assert_eq!(config.llm.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.workspace.token.as_deref(), Some("from-env"));
    }
}
