use crate::config::Config;
use crate::pipeline::RunSummary;
use crate::validation::Verdict;
use log::{debug, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity.
///
/// Diagnostics about unreadable files and paths are warnings, so they stay
/// visible unless `quiet` is set. `RUST_LOG` still overrides the level.
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    // try_init so that repeated initialisation (tests) is harmless
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: timeout={:?}, concurrency={}, memory_threshold={}B",
        config.timeout_duration(),
        config.gate_capacity(),
        config.memory_threshold_bytes()
    );
    info!(
        "HTTP: user_agent={}, follow_links={}",
        config.user_agent_header(),
        config.follow_links.unwrap_or(false)
    );
}

/// Log a file that could not be opened or read
pub fn log_file_error(path: &Path, action: &str, err: &std::io::Error) {
    warn!("Error {action} file {}: {err}", path.display());
}

/// Log a traversal failure for one input path
pub fn log_walk_error(root: &Path, err: &ignore::Error) {
    warn!("Error walking path {}: {err}", root.display());
}

/// Log the outcome of a single validation
pub fn log_verdict(candidate: &str, verdict: &Verdict) {
    match verdict {
        Verdict::Accepted(_) => debug!("✓ {candidate} -> {verdict}"),
        Verdict::Image(_) => info!("✗ {candidate} -> {verdict}"),
        Verdict::BadStatus(_) | Verdict::Unreachable(_) => debug!("✗ {candidate} -> {verdict}"),
    }
}

/// Log the totals of a finished run
pub fn log_run_complete(summary: &RunSummary, duration_ms: u128) {
    if summary.files_failed == 0 && summary.walk_errors == 0 {
        info!(
            "✅ Run complete: {} URL(s) accepted out of {} candidate(s) in {} file(s) ({}ms)",
            summary.accepted, summary.candidates, summary.files_discovered, duration_ms
        );
    } else {
        warn!(
            "⚠️ Run complete: {} URL(s) accepted out of {} candidate(s) in {} file(s), {} file error(s), {} walk error(s) ({}ms)",
            summary.accepted,
            summary.candidates,
            summary.files_discovered,
            summary.files_failed,
            summary.walk_errors,
            duration_ms
        );
    }
}
