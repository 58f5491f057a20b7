use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::{JoinHandle, JoinSet};

use super::extractor::Extractor;
use super::gate::ConcurrencyGate;
use super::summary::{RunStats, RunSummary};
use crate::config::Config;
use crate::core::constants::{files, gate};
use crate::core::error::{Result, SieveError};
use crate::discovery;
use crate::validation::ValidateUrl;

/// Tunables of the extraction pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub gate_capacity: usize,
    pub memory_threshold: u64,
    pub follow_links: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            gate_capacity: gate::DEFAULT_CAPACITY,
            memory_threshold: files::DEFAULT_MEMORY_THRESHOLD,
            follow_links: false,
        }
    }
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            gate_capacity: config.gate_capacity(),
            memory_threshold: config.memory_threshold_bytes(),
            follow_links: config.follow_links.unwrap_or(false),
        }
    }
}

/// Fans discovered files out to one extractor task each and funnels the
/// accepted URLs into a single result sink.
///
/// File tasks are not capped. Validation calls are, through the shared
/// [`ConcurrencyGate`], and so are open file handles inside the [`Extractor`].
pub struct Coordinator {
    validator: Arc<dyn ValidateUrl>,
    gate: ConcurrencyGate,
    settings: PipelineSettings,
}

impl Coordinator {
    pub fn new(validator: Arc<dyn ValidateUrl>, settings: PipelineSettings) -> Self {
        Self {
            validator,
            gate: ConcurrencyGate::new(settings.gate_capacity),
            settings,
        }
    }

    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    /// Start a run in the background.
    ///
    /// The receiver is the result sink. It yields `None` only after every
    /// extractor task has returned, because each task owns a sender and the
    /// coordinator drops its own sender last. The handle yields the run totals.
    pub fn spawn(&self, roots: Vec<PathBuf>) -> (JoinHandle<RunSummary>, UnboundedReceiver<String>) {
        let (sink, results) = mpsc::unbounded_channel();
        let stats = Arc::new(RunStats::default());
        let extractor = Extractor::new(
            Arc::clone(&self.validator),
            self.gate.clone(),
            self.settings.memory_threshold,
        )
        .with_stats(Arc::clone(&stats));
        let follow_links = self.settings.follow_links;

        let handle = tokio::spawn(async move {
            let (discovered, walk) = discovery::spawn_walk(roots, follow_links);
            fan_out(extractor, discovered, sink, &stats).await;

            let walk_errors = walk.await.unwrap_or_else(|err| {
                warn!("Directory walk failed: {err}");
                1
            });
            stats.snapshot(walk_errors)
        });

        (handle, results)
    }

    /// Run to completion, writing each accepted URL on its own line as soon as
    /// it arrives.
    pub async fn run<W: Write>(&self, roots: Vec<PathBuf>, out: &mut W) -> Result<RunSummary> {
        let (handle, mut results) = self.spawn(roots);

        while let Some(url) = results.recv().await {
            writeln!(out, "{url}")?;
            out.flush()?;
        }

        handle
            .await
            .map_err(|err| SieveError::Io(std::io::Error::other(err)))
    }
}

/// Spawn one extractor task per discovered path until discovery ends, then
/// wait for the remaining tasks. Finished tasks are reaped while discovery is
/// still running.
///
/// `sink` is dropped on return, after every task has finished.
async fn fan_out(
    extractor: Extractor,
    mut discovered: UnboundedReceiver<PathBuf>,
    sink: UnboundedSender<String>,
    stats: &RunStats,
) {
    let mut tasks = JoinSet::new();
    let mut discovering = true;

    loop {
        tokio::select! {
            next = discovered.recv(), if discovering => match next {
                Some(path) => {
                    stats.record_file_discovered();
                    let extractor = extractor.clone();
                    let sink = sink.clone();
                    tasks.spawn(async move { extractor.extract(&path, &sink).await });
                }
                None => {
                    discovering = false;
                    debug!("Discovery finished, {} extractor task(s) still running", tasks.len());
                }
            },
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(err) = joined {
                    stats.record_file_failed();
                    warn!("Extractor task failed: {err}");
                }
            },
            else => break,
        }
    }

    // Last sender: the result sink closes here, after every producer returned
    drop(sink);
}
