//! pincheck - checks SOURCES manifests for outdated repository pins

use clap::Parser;
use pincheck::cli::CliArgs;
use pincheck::logging;
use pincheck::orchestrator::Orchestrator;
use pincheck::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;

/// Some manifest or entry could not be checked
const EXIT_ERRORS: u8 = 2;

/// `--fail-on-outdated` was given and at least one pin is behind
const EXIT_OUTDATED: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        root = %args.path.display(),
        api = %args.api_url,
        "starting check"
    );

    let orchestrator = Orchestrator::new(&args)?;
    let result = orchestrator.run().await?;

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet, args.no_color);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    if result.has_errors() {
        Ok(ExitCode::from(EXIT_ERRORS))
    } else if args.fail_on_outdated && result.summary.has_outdated() {
        Ok(ExitCode::from(EXIT_OUTDATED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
