use clap::{CommandFactory, Parser};
use urlsieve::config::{CliConfig, Config};
use urlsieve::pipeline::{Coordinator, PipelineSettings};
use urlsieve::reporting::logging;
use urlsieve::ui::{Cli, cli_to_config};
use urlsieve::validation::HttpValidator;

use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Nothing to scan: show usage and leave without an error
    if cli.paths.is_empty() {
        let mut app = Cli::command();
        if let Err(e) = app.print_help() {
            eprintln!("Error: {e}");
        }
        println!();
        return;
    }

    if let Err(e) = run_urlsieve_logic(&cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Main extraction logic extracted from main() for testing
pub async fn run_urlsieve_logic(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);
    logging::log_config_info(&config);

    let validator = Arc::new(HttpValidator::from_config(&config)?);
    let coordinator = Coordinator::new(validator, PipelineSettings::from_config(&config));

    let started = Instant::now();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = coordinator.run(cli.paths.clone(), &mut out).await?;
    logging::log_run_complete(&summary, started.elapsed().as_millis());

    // Per-file and per-path failures were reported on the way; they do not
    // change the exit status
    Ok(())
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()?
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}
