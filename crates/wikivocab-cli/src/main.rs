//! wikivocab: convert a SKOS thesaurus into wikifier vocabulary files.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use wikivocab_cli::{telemetry, Cli, RunConfig};

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();
    let _log_guard = telemetry::init(&telemetry::LogSettings::from_env());

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{:#}", e), "Conversion failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = RunConfig::resolve(cli)?;
    let summary = wikivocab_cli::run(&config)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
