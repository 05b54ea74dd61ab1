//! Config Command
//!
//! Manage DanceSport Coach configuration.
//!
//! Usage:
//!   dancesport config show [-g] [-f toml|json|yaml]
//!   dancesport config path
//!   dancesport config edit [-g]
//!   dancesport config init [-g] [--force]

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show configuration
pub fn show(global: bool, format: &str) -> Result<()> {
    if !global {
        // Merged effective config; credentials are never serialized
        return ConfigLoader::show_config(format);
    }

    let Some(global_path) = ConfigLoader::global_config_path() else {
        println!("Cannot determine global config directory.");
        return Ok(());
    };

    if global_path.exists() {
        let content = std::fs::read_to_string(&global_path)?;
        println!("# Global Config: {}\n", global_path.display());
        println!("{}", content);
        if let Err(e) = ConfigLoader::load_from_file(&global_path) {
            Output::new().warning(&format!("Global config is invalid: {}", e));
        }
    } else {
        println!("No global config found.");
        println!("Run 'dancesport config init --global' to create one.");
    }
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Edit configuration file
pub fn edit(global: bool) -> Result<()> {
    ConfigLoader::edit_config(global)
}

/// Initialize configuration
pub fn init(global: bool, force: bool) -> Result<()> {
    let output = Output::new();
    let dir = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(force)?
    };

    output.success(&format!(
        "Initialized {} configuration",
        if global { "global" } else { "project" }
    ));
    output.field("Directory", dir.display());
    output.field("Config", dir.join("config.toml").display());
    Ok(())
}
