//! cms - Submission workflow client for the Cannabis Management System
//!
//! CLI binary for following and advancing police submissions through the
//! six-phase workflow.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cms_workflow::config::API_URL_ENV;
use cms_workflow::session::FileSessionStore;
use cms_workflow::workflow::SubmissionPhase;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;

use cli::TransitionOptions;

#[derive(Parser)]
#[command(name = "cms")]
#[command(about = "Submission workflow client for the Cannabis Management System")]
#[command(version)]
struct Cli {
    /// Base URL of the CMS API
    #[arg(
        long,
        global = true,
        env = API_URL_ENV,
        default_value = "http://localhost:8000/api/"
    )]
    api_url: String,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Session file (defaults to the user config directory)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the workflow phases and who may act at each
    Phases,

    /// Log in and cache your role for permission checks
    Login {
        /// API token (defaults to CMS_API_TOKEN)
        #[arg(long)]
        token: Option<String>,
    },

    /// Forget the cached login
    Logout,

    /// Show a submission's progress and the actions available to you
    Status {
        /// Submission ID
        id: u64,
    },

    /// Show a submission's phase history
    History {
        /// Submission ID
        id: u64,
    },

    /// Move a submission to its next phase
    Advance {
        /// Submission ID
        id: u64,

        /// Dry run - show what would be done without making changes
        #[arg(long)]
        dry_run: bool,
    },

    /// Return a submission to an earlier phase
    SendBack {
        /// Submission ID
        id: u64,

        /// Phase to return to (e.g. finance_approval)
        #[arg(long)]
        to: SubmissionPhase,

        /// Reason, recorded in the phase history
        #[arg(long)]
        reason: String,

        /// Dry run - show what would be done without making changes
        #[arg(long)]
        dry_run: bool,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List submissions you can act on
    Queue {
        /// Only submissions at this phase
        #[arg(long)]
        phase: Option<SubmissionPhase>,
    },

    /// Show or change display preferences
    Prefs {
        /// Terse output
        #[arg(long)]
        compact: Option<bool>,

        /// Rows per listing
        #[arg(long)]
        page_size: Option<u32>,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if matches!(cli.command, Commands::Phases) {
        cli::run_phases();
        return Ok(());
    }

    let session_path = cli
        .session_file
        .or_else(FileSessionStore::default_path)
        .context("could not determine config directory; pass --session-file")?;
    let store = FileSessionStore::new(session_path);
    debug!(path = %store.path().display(), "using session file");

    match cli.command {
        Commands::Phases => cli::run_phases(),
        Commands::Login { token } => {
            let api = cli::connect_with_token(&cli.api_url, &store, token.as_deref())?;
            cli::run_login(&api, &store, token).await?;
        }
        Commands::Logout => cli::run_logout(&store)?,
        Commands::Status { id } => {
            let api = cli::connect(&cli.api_url, &store)?;
            cli::run_status(&api, &store, id).await?;
        }
        Commands::History { id } => {
            let api = cli::connect(&cli.api_url, &store)?;
            cli::run_history(&api, id).await?;
        }
        Commands::Advance { id, dry_run } => {
            let api = cli::connect(&cli.api_url, &store)?;
            let options = TransitionOptions {
                dry_run,
                assume_yes: true,
            };
            cli::run_advance(&api, &store, id, options).await?;
        }
        Commands::SendBack {
            id,
            to,
            reason,
            dry_run,
            yes,
        } => {
            let api = cli::connect(&cli.api_url, &store)?;
            let options = TransitionOptions {
                dry_run,
                assume_yes: yes,
            };
            cli::run_send_back(&api, &store, id, to, &reason, options).await?;
        }
        Commands::Queue { phase } => {
            let api = cli::connect(&cli.api_url, &store)?;
            cli::run_queue(&api, &store, phase).await?;
        }
        Commands::Prefs { compact, page_size } => cli::run_prefs(&store, compact, page_size)?,
    }

    Ok(())
}
