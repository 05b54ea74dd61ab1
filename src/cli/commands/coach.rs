//! Coach Commands
//!
//! Progress analysis, practice routines, questions and dance comparisons.
//! Generated text is printed verbatim, including generation-failure text.

use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::ai::{ChatRole, PracticeStats};
use crate::cli::{CommandContext, Output, routine_file_name};
use crate::config::SkillLevel;
use crate::types::{Result, ResultExt};

/// Coach analysis of one dance store
pub async fn analyze(dance: &str) -> Result<()> {
    let mut ctx = CommandContext::load_workspace().await?;
    let entry = ctx.select(dance)?;
    // One query feeds both the stats and the coach prompt
    let figures = ctx.figures(&entry).await?;
    let stats = PracticeStats::from_records(&figures);
    let output = Output::new();

    output.header(&format!("Progress: {}", entry.label()));
    output.field("Total figures", stats.total_figures);
    output.field("Dance", &entry.dance);
    output.field("Category", &entry.category);
    if let Some(last) = &stats.last_updated {
        output.field("Last added", last);
    }

    let analysis = ctx.session.coach_mut().analyze_progress(&figures).await;
    output.section("Coach's Analysis");
    output.body(&analysis);

    if !stats.figures.is_empty() {
        output.section("Figures");
        for figure in &stats.figures {
            println!("  - {} {}", figure.title, figure.url.as_deref().unwrap_or(""));
        }
    }
    Ok(())
}

/// Routine generation options
#[derive(Debug, Clone, Default)]
pub struct RoutineOptions {
    pub level: Option<SkillLevel>,
    pub focus: Vec<String>,
    pub save: bool,
}

/// 30-minute practice routine for one dance store
pub async fn routine(dance: &str, options: RoutineOptions) -> Result<()> {
    let mut ctx = CommandContext::load_workspace().await?;
    let entry = ctx.select(dance)?;
    let level = options
        .level
        .unwrap_or(ctx.config.coach.default_skill_level);
    let output = Output::new();

    let routine = ctx
        .session
        .coach_mut()
        .suggest_practice_routine(&entry.dance, level, &options.focus)
        .await;

    output.header(&format!("Practice Routine: {} ({})", entry.dance, level));
    output.body(&routine);

    if options.save {
        let dir = ctx.routine_dir();
        std::fs::create_dir_all(&dir)
            .with_context(format!("Failed to create {}", dir.display()))?;
        let path = dir.join(routine_file_name(&entry.dance, Local::now().date_naive()));
        std::fs::write(&path, &routine)
            .with_context(format!("Failed to write {}", path.display()))?;
        info!("Saved routine to {}", path.display());
        output.success(&format!("Saved to {}", path.display()));
    }
    Ok(())
}

/// One question, answered against the knowledge table
pub async fn ask(question: &str, dance: Option<&str>) -> Result<()> {
    let mut ctx = CommandContext::connect().await?;
    let context = dance.map(focus_context);
    let answer = ctx
        .session
        .coach_mut()
        .answer_question(question, context.as_deref())
        .await;
    Output::new().body(&answer);
    Ok(())
}

/// Interactive question loop. `/clear` resets the log, `/history` prints it,
/// `/exit` (or end of input) leaves.
pub async fn chat(dance: Option<&str>) -> Result<()> {
    let mut ctx = CommandContext::connect().await?;
    let context = dance.map(focus_context);
    let output = Output::new();

    output.header("Chat with your coach");
    output.info("Type /history, /clear or /exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        output.prompt("you>");
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match line.trim() {
            "" => continue,
            "/exit" | "/quit" => break,
            "/clear" => {
                ctx.session.coach_mut().clear_history();
                output.success("Chat history cleared");
            }
            "/history" => {
                for message in ctx.session.coach().history() {
                    let who = match message.role {
                        ChatRole::User => "you",
                        ChatRole::Assistant => "coach",
                    };
                    println!(
                        "[{}] {}: {}",
                        message.timestamp.format("%H:%M:%S"),
                        who,
                        message.content.lines().next().unwrap_or("")
                    );
                }
            }
            question => {
                let answer = ctx
                    .session
                    .coach_mut()
                    .answer_question(question, context.as_deref())
                    .await;
                output.body(&answer);
            }
        }
    }
    Ok(())
}

/// Comparison of two dances from the knowledge table
pub async fn compare(first: &str, second: &str) -> Result<()> {
    let mut ctx = CommandContext::connect().await?;
    let text = ctx.session.coach_mut().compare_dances(first, second).await;
    let output = Output::new();
    output.header(&format!("{} vs {}", first, second));
    output.body(&text);
    Ok(())
}

fn focus_context(dance: &str) -> String {
    format!("Current focus: {}", dance)
}
