//! Workspace Commands
//!
//! Inspect what the integration can see: the page hierarchy, the located
//! DanceSport stores, single pages and store schemas.

use serde_json::{Value, json};

use crate::cli::{CommandContext, Output};
use crate::types::Result;
use crate::workspace::{WorkspaceObject, plain_text, results};

/// Hierarchy summary and DanceSport content
pub async fn run(format: &str) -> Result<()> {
    let ctx = CommandContext::load_workspace().await?;
    let Some(loaded) = ctx.session.workspace() else {
        return Ok(());
    };
    let index = &loaded.index;
    let content = &loaded.content;

    if format == "json" {
        let summary = json!({
            "bot": ctx.session.bot_name(),
            "totals": {
                "objects": index.total_objects,
                "pages": index.total_pages,
                "databases": index.total_databases,
                "unparented_databases": index.unparented_databases().len(),
            },
            "top_level": index.top_level,
            "dancesport": content,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let output = Output::new();
    output.header("Workspace");
    output.field("Connected as", ctx.session.bot_name());
    output.field("Objects", index.total_objects);
    output.field("Pages", index.total_pages);
    output.field("Databases", index.total_databases);
    output.field("Unparented", index.unparented_databases().len());

    output.section("Top-level pages");
    if index.top_level.is_empty() {
        println!("  (none)");
    }
    for page in &index.top_level {
        println!(
            "  {} ({} pages, {} databases)",
            page.title,
            index.child_pages(&page.id).len(),
            index.child_databases(&page.id).len()
        );
    }

    output.section("DanceSport");
    match &content.root {
        None => output.warning("No top-level page mentions \"DanceSport\""),
        Some(root) => {
            output.field("Root", &root.title);
            if content.is_empty() {
                output.info("No Fundamental/Open category stores with dance stores found");
            }
            for (i, entry) in content.categories.iter().enumerate() {
                println!("  {}. {}", i + 1, entry.label());
            }
        }
    }
    Ok(())
}

/// Numbered list of dance stores, as accepted by `<dance>` arguments
pub async fn dances() -> Result<()> {
    let ctx = CommandContext::load_workspace().await?;
    let output = Output::new();

    let Some(loaded) = ctx.session.workspace() else {
        return Ok(());
    };
    if loaded.content.root.is_none() {
        output.warning("No DanceSport page found. Share a page titled \"DanceSport\" with the integration.");
        return Ok(());
    }
    if loaded.content.is_empty() {
        output.info("No dance stores found under the DanceSport page.");
        return Ok(());
    }

    for (i, entry) in loaded.content.categories.iter().enumerate() {
        println!("{:>3}. {}", i + 1, entry.label());
    }
    Ok(())
}

/// One page with its child blocks
pub async fn page(page_id: &str) -> Result<()> {
    let ctx = CommandContext::connect().await?;
    let client = ctx.session.client();
    let output = Output::new();

    let page = WorkspaceObject::from_value(client.get_page(page_id).await?);
    output.header(&page.title);
    output.field("Id", &page.id);
    if let Some(url) = &page.url {
        output.field("Url", url);
    }
    if let Some(created) = page.created_at() {
        output.field("Created", created.format("%Y-%m-%d %H:%M UTC"));
    }

    let blocks = results(client.get_block_children(page_id).await?);
    output.section(&format!("Blocks ({})", blocks.len()));
    for block in &blocks {
        println!("  {}", block_line(block));
    }
    Ok(())
}

/// Property names and types of a dance store
pub async fn schema(dance: &str) -> Result<()> {
    let ctx = CommandContext::load_workspace().await?;
    let entry = ctx.select(dance)?;
    let database = ctx.session.client().get_database(&entry.database_id).await?;
    let output = Output::new();

    output.header(&entry.label());
    let Some(properties) = database.get("properties").and_then(Value::as_object) else {
        output.info("Store has no properties");
        return Ok(());
    };
    for (name, property) in properties {
        let kind = property.get("type").and_then(Value::as_str).unwrap_or("?");
        output.field(name, kind);
    }
    Ok(())
}

/// `type: text` summary of a block
fn block_line(block: &Value) -> String {
    let kind = block.get("type").and_then(Value::as_str).unwrap_or("unknown");
    let text = plain_text(block.get(kind).and_then(|b| b.get("rich_text")));
    if text.is_empty() {
        format!("[{}]", kind)
    } else {
        format!("[{}] {}", kind, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_line() {
        let block = json!({
            "type": "heading_2",
            "heading_2": {"rich_text": [{"plain_text": "Timing"}]}
        });
        assert_eq!(block_line(&block), "[heading_2] Timing");
        assert_eq!(block_line(&json!({"type": "divider", "divider": {}})), "[divider]");
        assert_eq!(block_line(&json!({})), "[unknown]");
    }
}
