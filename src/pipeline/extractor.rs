use std::io;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;

use super::gate::ConcurrencyGate;
use super::summary::RunStats;
use crate::core::constants::files;
use crate::reporting::logging;
use crate::validation::ValidateUrl;

/// Bytes that end a candidate: the token delimiter and the line break
pub fn is_delimiter(byte: u8) -> bool {
    byte == files::TOKEN_DELIMITER || byte == files::LINE_DELIMITER
}

/// Split raw content into the segments found between delimiters.
///
/// Segments are untrimmed and may be empty; see [`candidate`].
pub fn split_segments(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    content.split(|byte| is_delimiter(*byte))
}

/// Decode and trim one segment. Blank segments yield `None` and are never
/// validated.
pub fn candidate(segment: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(segment);
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// How a file's content is brought into memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStrategy {
    /// Read everything at once and validate the batch under one gate token
    InMemory,
    /// Read one segment at a time, taking a gate token per candidate
    Streaming,
}

impl ReadStrategy {
    pub fn for_size(size: u64, memory_threshold: u64) -> Self {
        if size < memory_threshold {
            ReadStrategy::InMemory
        } else {
            ReadStrategy::Streaming
        }
    }
}

/// An I/O failure tagged with what the extractor was doing at the time
#[derive(Debug)]
struct FileError {
    action: &'static str,
    source: io::Error,
}

impl FileError {
    fn opening(source: io::Error) -> Self {
        Self {
            action: "opening",
            source,
        }
    }

    fn inspecting(source: io::Error) -> Self {
        Self {
            action: "getting file info for",
            source,
        }
    }

    fn reading(source: io::Error) -> Self {
        Self {
            action: "reading",
            source,
        }
    }

    fn token_too_long() -> Self {
        Self::reading(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("token too long (over {} bytes)", files::MAX_TOKEN_BYTES),
        ))
    }
}

fn check_length(segment: &[u8]) -> Result<(), FileError> {
    if segment.len() > files::MAX_TOKEN_BYTES {
        Err(FileError::token_too_long())
    } else {
        Ok(())
    }
}

/// Whether the result sink still has a consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    SinkClosed,
}

/// Reads one file, splits it into candidates and sends the accepted ones
/// to the result sink.
///
/// Clones share the validation gate and the open-file slots, so any number of
/// extractor tasks keeps at most [`files::MAX_OPEN_FILES`] handles open.
#[derive(Clone)]
pub struct Extractor {
    validator: Arc<dyn ValidateUrl>,
    gate: ConcurrencyGate,
    file_slots: ConcurrencyGate,
    memory_threshold: u64,
    stats: Arc<RunStats>,
}

impl Extractor {
    pub fn new(
        validator: Arc<dyn ValidateUrl>,
        gate: ConcurrencyGate,
        memory_threshold: u64,
    ) -> Self {
        Self {
            validator,
            gate,
            file_slots: ConcurrencyGate::new(files::MAX_OPEN_FILES),
            memory_threshold,
            stats: Arc::new(RunStats::default()),
        }
    }

    pub fn with_stats(mut self, stats: Arc<RunStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Process a single file.
    ///
    /// Failures are logged and counted, never returned: one unreadable file
    /// must not affect any other. URLs sent before a mid-read failure stay sent.
    pub async fn extract(&self, path: &Path, sink: &UnboundedSender<String>) {
        if let Err(err) = self.try_extract(path, sink).await {
            self.stats.record_file_failed();
            logging::log_file_error(path, err.action, &err.source);
        }
    }

    async fn try_extract(
        &self,
        path: &Path,
        sink: &UnboundedSender<String>,
    ) -> Result<(), FileError> {
        // The slot and the handle live until this function returns, on every path
        let _slot = self.file_slots.acquire().await;
        let file = File::open(path).await.map_err(FileError::opening)?;
        let size = file.metadata().await.map_err(FileError::inspecting)?.len();

        let flow = match ReadStrategy::for_size(size, self.memory_threshold) {
            ReadStrategy::InMemory => self.extract_in_memory(file, size, sink).await?,
            ReadStrategy::Streaming => self.extract_streaming(file, sink).await?,
        };

        if flow == Flow::SinkClosed {
            debug!("Result sink closed, stopped early in {}", path.display());
        }
        Ok(())
    }

    async fn extract_in_memory(
        &self,
        mut file: File,
        size: u64,
        sink: &UnboundedSender<String>,
    ) -> Result<Flow, FileError> {
        let mut raw = Vec::with_capacity(usize::try_from(size).unwrap_or_default());
        file.read_to_end(&mut raw)
            .await
            .map_err(FileError::reading)?;

        // One token covers the whole batch; the content is already resident
        let _permit = self.gate.acquire().await;
        for segment in split_segments(&raw) {
            check_length(segment)?;
            if let Some(url) = candidate(segment)
                && self.validate_candidate(url, sink).await == Flow::SinkClosed
            {
                return Ok(Flow::SinkClosed);
            }
        }

        Ok(Flow::Continue)
    }

    /// Read one segment at a time so memory stays bounded by the longest
    /// allowed token, whatever the file size or line length.
    async fn extract_streaming<R: AsyncRead + Unpin>(
        &self,
        source: R,
        sink: &UnboundedSender<String>,
    ) -> Result<Flow, FileError> {
        let mut reader = BufReader::new(source);
        let mut segment = Vec::new();

        loop {
            let chunk = reader.fill_buf().await.map_err(FileError::reading)?;
            if chunk.is_empty() {
                // Trailing segment without a delimiter after it
                check_length(&segment)?;
                return Ok(self.validate_streamed(&segment, sink).await);
            }

            let (consumed, complete) = match chunk.iter().position(|byte| is_delimiter(*byte)) {
                Some(at) => {
                    segment.extend_from_slice(&chunk[..at]);
                    (at + 1, true)
                }
                None => {
                    segment.extend_from_slice(chunk);
                    (chunk.len(), false)
                }
            };
            reader.consume(consumed);
            check_length(&segment)?;

            if complete {
                if self.validate_streamed(&segment, sink).await == Flow::SinkClosed {
                    return Ok(Flow::SinkClosed);
                }
                segment.clear();
            }
        }
    }

    async fn validate_streamed(&self, segment: &[u8], sink: &UnboundedSender<String>) -> Flow {
        let Some(url) = candidate(segment) else {
            return Flow::Continue;
        };
        let _permit = self.gate.acquire().await;
        self.validate_candidate(url, sink).await
    }

    /// Validate one candidate; the caller holds the gate token.
    async fn validate_candidate(&self, url: String, sink: &UnboundedSender<String>) -> Flow {
        self.stats.record_candidate();
        if self.validator.validate(&url).await {
            self.emit(url, sink)
        } else {
            Flow::Continue
        }
    }

    fn emit(&self, url: String, sink: &UnboundedSender<String>) -> Flow {
        match sink.send(url) {
            Ok(()) => {
                self.stats.record_accepted();
                Flow::Continue
            }
            Err(_) => Flow::SinkClosed,
        }
    }
}
