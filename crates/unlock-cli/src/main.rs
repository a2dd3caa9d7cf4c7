//! Command line tool answering course prerequisite questions.
//!
//! Reads a JSON dataset mapping course codes to prerequisite text and
//! reports whether a set of completed courses unlocks a course.

mod cli;
mod output;

use clap::Parser;
use tracing::debug;

use cli::Cli;
use unlock_cli::config::CliConfig;
use unlock_cli::logging::init_logging;

fn main() {
    let args = Cli::parse();

    let config = match args.build_config() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        conditions = %config.conditions.display(),
        "starting unlock"
    );

    if let Err(e) = args.run(&config) {
        tracing::error!(error = %format!("{e:#}"), "command failed");
        std::process::exit(1);
    }
}
