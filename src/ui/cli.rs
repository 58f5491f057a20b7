// Command-line interface definitions and parsing for urlsieve

use crate::config::{CliConfig, parse_duration};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Files or directories to scan (directories are walked recursively)
    pub paths: Vec<PathBuf>,

    // Core Options
    /// Per-request timeout, e.g. 500ms, 10s, 1m30s (default: 10s)
    #[arg(
        short = 't',
        long,
        value_name = "DURATION",
        value_parser = parse_timeout,
        help_heading = "Core Options"
    )]
    pub timeout: Option<Duration>,

    /// Maximum concurrent validation requests (default: 100)
    #[arg(long, value_name = "COUNT", value_parser = parse_positive::<usize>, help_heading = "Core Options")]
    pub concurrency: Option<usize>,

    /// Files smaller than this many bytes are read into memory (default: 1 GiB)
    #[arg(long, value_name = "BYTES", value_parser = parse_positive::<u64>, help_heading = "Core Options")]
    pub memory_threshold: Option<u64>,

    /// Follow symbolic links while walking directories
    #[arg(short = 'L', long, help_heading = "Core Options")]
    pub follow_links: bool,

    // Network
    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network")]
    pub user_agent: Option<String>,

    // Output & Verbosity
    /// Suppress diagnostics on stderr
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let timeout = parse_duration(raw).map_err(|e| e.to_string())?;
    if timeout.is_zero() {
        return Err("timeout cannot be 0".to_string());
    }
    Ok(timeout)
}

fn parse_positive<T>(raw: &str) -> Result<T, String>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let value: T = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a valid number"))?;
    if value <= T::default() {
        return Err(format!("'{raw}' must be greater than 0"));
    }
    Ok(value)
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        timeout: cli.timeout,
        concurrency: cli.concurrency,
        memory_threshold: cli.memory_threshold,
        user_agent: cli.user_agent.clone(),
        follow_links: cli.follow_links,
        quiet: cli.quiet,
        verbose: cli.verbose,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli__definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli__no_paths_is_accepted() {
        let cli = Cli::try_parse_from(["urlsieve"]).expect("empty invocation parses");
        assert!(cli.paths.is_empty());
        assert_eq!(cli.timeout, None);
    }

    #[test]
    fn test_cli__timeout_short_and_long() {
        let short = Cli::try_parse_from(["urlsieve", "-t", "500ms", "a.txt"]).unwrap();
        assert_eq!(short.timeout, Some(Duration::from_millis(500)));

        let long = Cli::try_parse_from(["urlsieve", "--timeout", "1m", "a.txt", "b"]).unwrap();
        assert_eq!(long.timeout, Some(Duration::from_secs(60)));
        assert_eq!(long.paths, vec![PathBuf::from("a.txt"), PathBuf::from("b")]);
    }

    #[test]
    fn test_cli__rejects_bad_values() {
        assert!(Cli::try_parse_from(["urlsieve", "-t", "soon", "a.txt"]).is_err());
        assert!(Cli::try_parse_from(["urlsieve", "-t", "0s", "a.txt"]).is_err());
        assert!(Cli::try_parse_from(["urlsieve", "--concurrency", "0", "a.txt"]).is_err());
        assert!(Cli::try_parse_from(["urlsieve", "--concurrency", "many", "a.txt"]).is_err());
        assert!(Cli::try_parse_from(["urlsieve", "--memory-threshold", "-5", "a.txt"]).is_err());
    }

    #[test]
    fn test_cli_to_config() {
        let cli = Cli::try_parse_from([
            "urlsieve",
            "-t",
            "2s",
            "--concurrency",
            "8",
            "--memory-threshold",
            "1024",
            "-L",
            "--user-agent",
            "bot",
            "-v",
            "--no-config",
            "dir",
        ])
        .unwrap();

        let config = cli_to_config(&cli);

        assert_eq!(config.timeout, Some(Duration::from_secs(2)));
        assert_eq!(config.concurrency, Some(8));
        assert_eq!(config.memory_threshold, Some(1024));
        assert!(config.follow_links);
        assert_eq!(config.user_agent.as_deref(), Some("bot"));
        assert!(config.verbose);
        assert!(!config.quiet);
        assert!(config.no_config);
        assert_eq!(config.config_file, None);
    }
}
