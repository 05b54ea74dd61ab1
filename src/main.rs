use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dancesport_coach::CoachError;
use dancesport_coach::cli::commands::{account, coach, comment, config, workspace};
use dancesport_coach::config::SkillLevel;

#[derive(Parser)]
#[command(name = "dancesport")]
#[command(
    version,
    about = "AI DanceSport coach backed by your Notion practice log"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate credentials and show the integration identity
    Whoami,

    /// Show the workspace hierarchy and located DanceSport content
    Workspace {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// List dance stores (use the number or name as <DANCE>)
    Dances,

    /// Analyze progress in one dance store
    Analyze {
        #[arg(help = "Dance store number or name")]
        dance: String,
    },

    /// Generate a 30-minute practice routine
    Routine {
        #[arg(help = "Dance store number or name")]
        dance: String,
        #[arg(long, short, help = "Skill level: beginner, intermediate, advanced")]
        level: Option<SkillLevel>,
        #[arg(long, num_args = 1.., help = "Focus areas (e.g. Timing Frame)")]
        focus: Vec<String>,
        #[arg(long, help = "Save as {dance}_routine_{YYYYMMDD}.txt in coach.routine_dir")]
        save: bool,
    },

    /// Write a coach comment for a figure
    Comment {
        #[arg(help = "Dance store number or name")]
        dance: String,
        #[arg(long, help = "Figure title")]
        figure: String,
        #[arg(long, help = "What you noticed while practicing")]
        observation: String,
        #[arg(long, help = "Post as a comment on the figure page")]
        post: bool,
        #[arg(long, help = "Append as a paragraph to the figure page")]
        append: bool,
        #[arg(long, help = "Use the observation as-is instead of generating")]
        raw: bool,
    },

    /// List comments on a figure
    Comments {
        #[arg(help = "Dance store number or name")]
        dance: String,
        #[arg(long, help = "Figure title")]
        figure: String,
    },

    /// Ask the coach a question
    Ask {
        question: String,
        #[arg(long, help = "Dance you are currently working on")]
        dance: Option<String>,
    },

    /// Interactive chat with the coach
    Chat {
        #[arg(long, help = "Dance you are currently working on")]
        dance: Option<String>,
    },

    /// Compare two dances (cha_cha, rumba, swing, bolero, mambo)
    Compare { first: String, second: String },

    /// Show a page and its blocks
    Page { page_id: String },

    /// Show the property schema of a dance store
    Schema {
        #[arg(help = "Dance store number or name")]
        dance: String,
    },

    /// Update page properties from a JSON object
    SetProperties {
        page_id: String,
        #[arg(long, help = "JSON object, e.g. '{\"Done\": {\"checkbox\": true}}'")]
        properties: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global config file only")]
        global: bool,
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json, yaml"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Edit configuration file with $EDITOR
    Edit {
        #[arg(long, short, help = "Edit global config")]
        global: bool,
    },
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mdancesport encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);

            // Only setup problems fail the process; everything else is reported
            match e.downcast_ref::<CoachError>() {
                Some(err) if !err.is_setup_failure() => {
                    if let Some(hint) = err.category().and_then(|c| c.hint()) {
                        eprintln!("\x1b[90mHint: {}\x1b[0m", hint);
                    }
                    ExitCode::SUCCESS
                }
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Commands::Config { action } = &cli.command {
        match action {
            ConfigAction::Show { global, format } => config::show(*global, format)?,
            ConfigAction::Path => config::path()?,
            ConfigAction::Edit { global } => config::edit(*global)?,
            ConfigAction::Init { global, force } => config::init(*global, *force)?,
        }
        return Ok(());
    }

    let rt = Runtime::new()?;
    rt.block_on(async move {
        match cli.command {
            Commands::Whoami => account::whoami().await,
            Commands::Workspace { format } => workspace::run(&format).await,
            Commands::Dances => workspace::dances().await,
            Commands::Analyze { dance } => coach::analyze(&dance).await,
            Commands::Routine {
                dance,
                level,
                focus,
                save,
            } => {
                coach::routine(&dance, coach::RoutineOptions { level, focus, save }).await
            }
            Commands::Comment {
                dance,
                figure,
                observation,
                post,
                append,
                raw,
            } => {
                comment::comment(
                    &dance,
                    &figure,
                    &observation,
                    comment::CommentOptions { post, append, raw },
                )
                .await
            }
            Commands::Comments { dance, figure } => comment::list(&dance, &figure).await,
            Commands::Ask { question, dance } => coach::ask(&question, dance.as_deref()).await,
            Commands::Chat { dance } => coach::chat(dance.as_deref()).await,
            Commands::Compare { first, second } => coach::compare(&first, &second).await,
            Commands::Page { page_id } => workspace::page(&page_id).await,
            Commands::Schema { dance } => workspace::schema(&dance).await,
            Commands::SetProperties {
                page_id,
                properties,
            } => comment::set_properties(&page_id, &properties).await,
            Commands::Config { .. } => Ok(()),
        }
    })?;

    Ok(())
}
