//! factor-insight - Command-line front end for the analysis pipeline.
//!
//! Usage:
//!
//! ```text
//! factor-insight <snapshot.json|snapshot.yaml>
//! factor-insight <snapshot> contrast <factor-a> <factor-b>
//! ```

use std::env;
use std::error::Error;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use factor_insight::adapters::load_snapshot;
use factor_insight::application::ViewpointAnalysis;
use factor_insight::config::{AppConfig, LoggingConfig};
use factor_insight::domain::foundation::FactorId;

const USAGE: &str = "usage: factor-insight <snapshot> [contrast <factor-a> <factor-b>]";

fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);

    match run(&config, env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Analysis failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(config: &AppConfig, args: Vec<String>) -> Result<(), Box<dyn Error>> {
    config.validate()?;

    let (path, contrast) = match args.as_slice() {
        [path] => (path, None),
        [path, command, a, b] if command == "contrast" => {
            (path, Some((a.parse::<FactorId>()?, b.parse::<FactorId>()?)))
        }
        _ => return Err(USAGE.into()),
    };

    let snapshot = load_snapshot(path)?;
    info!(
        path = %path,
        factors = snapshot.factor_count(),
        statements = snapshot.statement_count(),
        "Loaded study snapshot"
    );

    let report = ViewpointAnalysis::run(&snapshot, &config.analysis, None)?;

    let output = match contrast {
        Some((a, b)) => {
            let result = ViewpointAnalysis::contrast(&report, a, b)
                .ok_or_else(|| format!("unknown factor in contrast {} / {}", a, b))?;
            serde_json::to_string_pretty(&result)?
        }
        None => serde_json::to_string_pretty(&report)?,
    };

    println!("{}", output);
    Ok(())
}
