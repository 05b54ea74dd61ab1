//! Write-back Commands
//!
//! Coach comments on figures, comment listing, and page property updates.

use serde_json::Value;
use tracing::warn;

use crate::cli::util::find_figure;
use crate::cli::{CommandContext, Output};
use crate::constants::messages::GENERATION_ERROR_PREFIX;
use crate::types::{CoachError, Result};
use crate::workspace::{paragraph_block, plain_text};

/// Where a comment goes besides the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentOptions {
    /// Post as a page comment
    pub post: bool,
    /// Append as a paragraph block on the figure page
    pub append: bool,
    /// Use the observation verbatim instead of generating a coach comment
    pub raw: bool,
}

pub async fn comment(
    dance: &str,
    figure: &str,
    observation: &str,
    options: CommentOptions,
) -> Result<()> {
    let mut ctx = CommandContext::load_workspace().await?;
    let entry = ctx.select(dance)?;
    let figures = ctx.figures(&entry).await?;
    let page = find_figure(&figures, figure)?.clone();
    let output = Output::new();

    let text = if options.raw {
        observation.to_string()
    } else {
        ctx.session
            .coach_mut()
            .create_practice_comment(&entry.dance, observation)
            .await
    };

    output.header(&format!("Comment for {} / {}", entry.dance, page.title));
    output.body(&text);

    if !(options.post || options.append) {
        return Ok(());
    }
    if text.starts_with(GENERATION_ERROR_PREFIX) {
        warn!("Not writing failed generation to {}", page.id);
        output.warning("Comment generation failed; nothing was written to the workspace");
        return Ok(());
    }

    let client = ctx.session.client();
    if options.post {
        client.add_comment(&page.id, &text).await?;
        output.success(&format!("Comment posted to {}", page.title));
    }
    if options.append {
        client
            .append_block_children(&page.id, vec![paragraph_block(&text)])
            .await?;
        output.success(&format!("Comment appended to {}", page.title));
    }
    Ok(())
}

/// Existing comments on a figure page
pub async fn list(dance: &str, figure: &str) -> Result<()> {
    let ctx = CommandContext::load_workspace().await?;
    let entry = ctx.select(dance)?;
    let figures = ctx.figures(&entry).await?;
    let page = find_figure(&figures, figure)?;
    let output = Output::new();

    let comments = ctx.session.client().get_comments(&page.id).await?;
    output.header(&format!("Comments on {} ({})", page.title, comments.len()));
    for comment in &comments {
        let created = comment
            .get("created_time")
            .and_then(Value::as_str)
            .unwrap_or("-");
        println!("  [{}] {}", created, plain_text(comment.get("rich_text")));
    }
    Ok(())
}

/// Patch page properties from a JSON object
pub async fn set_properties(page_id: &str, properties: &str) -> Result<()> {
    let properties: Value = serde_json::from_str(properties)?;
    if !properties.is_object() {
        return Err(CoachError::Config(
            "--properties must be a JSON object keyed by property name".to_string(),
        ));
    }

    let ctx = CommandContext::connect().await?;
    let updated = ctx
        .session
        .client()
        .update_page_properties(page_id, properties)
        .await?;

    let id = updated.get("id").and_then(Value::as_str).unwrap_or(page_id);
    Output::new().success(&format!("Updated properties of {}", id));
    Ok(())
}
