//! Command dispatch for the `unlock` entrypoint.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};
use unlock_cli::config::{CliConfig, LogLevel};
use unlock_cli::error::CliError;
use unlock_core::{Conditions, tokenize};

use crate::output::{
    CheckReport, ExplainReport, write_check, write_courses, write_explain, write_json,
};

/// Answer course prerequisite questions from a conditions dataset.
#[derive(Parser, Debug)]
#[command(name = "unlock", version, about)]
pub(crate) struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,
    /// Path to the JSON conditions dataset.
    #[arg(long, global = true)]
    conditions: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether completed courses unlock a target course.
    Check(CheckArgs),
    /// Show how a course's prerequisite is tokenized and compiled.
    Explain(ExplainArgs),
    /// List every course the completed courses unlock.
    Unlocked(UnlockedArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Course to check.
    target: String,
    /// Completed course codes, comma separated.
    #[arg(long, value_delimiter = ',')]
    completed: Vec<String>,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ExplainArgs {
    /// Course whose prerequisite should be shown.
    target: String,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct UnlockedArgs {
    /// Completed course codes, comma separated.
    #[arg(long, value_delimiter = ',')]
    completed: Vec<String>,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Resolve configuration from the environment and command line flags.
    pub(crate) fn build_config(&self) -> Result<CliConfig, CliError> {
        let config = CliConfig::from_env()?;
        Ok(config.apply_overrides(self.log_level, self.conditions.clone()))
    }

    /// Load the dataset and run the selected command.
    pub(crate) fn run(self, config: &CliConfig) -> Result<()> {
        let conditions = Conditions::from_path(&config.conditions)
            .wrap_err("failed to load conditions dataset")?;
        let mut stdout = io::stdout();
        match self.command {
            Commands::Check(args) => handle_check(&conditions, &args, &mut stdout)?,
            Commands::Explain(args) => handle_explain(&conditions, &args, &mut stdout)?,
            Commands::Unlocked(args) => handle_unlocked(&conditions, &args, &mut stdout)?,
        }
        stdout.flush().wrap_err("failed to flush output")
    }
}

fn completed_courses(raw: &[String]) -> Vec<&str> {
    raw.iter()
        .map(|course| course.trim())
        .filter(|course| !course.is_empty())
        .collect()
}

fn handle_check(conditions: &Conditions, args: &CheckArgs, out: &mut dyn Write) -> Result<()> {
    let completed = completed_courses(&args.completed);
    let unlocked = conditions
        .is_unlocked(&completed, &args.target)
        .wrap_err_with(|| format!("failed to check {}", args.target))?;
    let report = CheckReport {
        target: &args.target,
        unlocked,
    };
    if args.json {
        write_json(out, &report)
    } else {
        write_check(out, &report)
    }
}

fn handle_explain(conditions: &Conditions, args: &ExplainArgs, out: &mut dyn Write) -> Result<()> {
    let text = conditions.text(&args.target)?;
    let tokens = tokenize(text);
    let prerequisite = conditions.prerequisite(&args.target)?;
    let report = ExplainReport {
        course: &args.target,
        text,
        tokens: &tokens,
        tree: prerequisite.root(),
    };
    if args.json {
        write_json(out, &report)
    } else {
        write_explain(out, &report)
    }
}

fn handle_unlocked(conditions: &Conditions, args: &UnlockedArgs, out: &mut dyn Write) -> Result<()> {
    let completed = completed_courses(&args.completed);
    let compiled = conditions.compile();
    let skipped = compiled.failures().count();
    if skipped > 0 {
        tracing::warn!(skipped, "some prerequisites could not be compiled");
    }
    let courses = compiled.unlocked(&completed);
    tracing::info!(count = courses.len(), "listed unlocked courses");
    if args.json {
        write_json(out, &courses)
    } else {
        write_courses(out, &courses)
    }
}
