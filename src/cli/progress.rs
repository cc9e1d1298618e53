//! CLI progress callback and fetch spinner

use crate::cli::style::{Stylize, check, spinner_style};
use anstream::{eprintln, println};
use async_trait::async_trait;
use cms_workflow::error::{Error, Result};
use cms_workflow::transition::{TransitionProgress, TransitionStep};
use indicatif::ProgressBar;
use std::future::Future;
use std::time::Duration;

/// CLI progress callback with styled output
///
/// Two modes:
/// - verbose: every step and message
/// - compact: only the final line and errors
pub struct CliProgress {
    /// Verbose mode shows all steps
    pub verbose: bool,
}

impl CliProgress {
    /// Progress matching the user's `compact` preference
    pub const fn new(compact: bool) -> Self {
        Self { verbose: !compact }
    }
}

#[async_trait]
impl TransitionProgress for CliProgress {
    async fn on_step(&self, step: TransitionStep) {
        match step {
            TransitionStep::Complete => println!("{} {}", check(), step.to_string().success()),
            _ if self.verbose => println!("{}...", step.to_string().emphasis()),
            _ => {}
        }
    }

    async fn on_error(&self, err: &Error) {
        eprintln!("{}: {}", "error".error(), err);
    }

    async fn on_message(&self, message: &str) {
        if self.verbose {
            println!("{message}");
        } else {
            println!("  {}", message.muted());
        }
    }
}

/// Await `fut` behind a spinner showing `message`
pub async fn with_spinner<T>(message: &str, fut: impl Future<Output = Result<T>>) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = fut.await;
    spinner.finish_and_clear();
    result
}
