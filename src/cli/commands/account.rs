//! Whoami Command
//!
//! Validates both credentials and shows the integration identity.

use serde_json::Value;

use crate::cli::{CommandContext, Output};
use crate::types::Result;

pub async fn whoami() -> Result<()> {
    let ctx = CommandContext::connect().await?;
    let output = Output::new();
    let identity = ctx.session.identity();
    let field = |key: &str| identity.get(key).and_then(Value::as_str).unwrap_or("-");

    output.success(&format!("Connected as {}", ctx.session.bot_name()));
    output.field("Id", field("id"));
    output.field("Type", field("type"));
    if let Some(workspace) = identity
        .pointer("/bot/workspace_name")
        .and_then(Value::as_str)
    {
        output.field("Workspace", workspace);
    }
    output.field(
        "Coach model",
        format!(
            "{} ({})",
            ctx.session.coach().model(),
            ctx.session.coach().provider_name()
        ),
    );
    Ok(())
}
