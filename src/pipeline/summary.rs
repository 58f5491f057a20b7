use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared by every task of one run
#[derive(Debug, Default)]
pub struct RunStats {
    files_discovered: AtomicUsize,
    files_failed: AtomicUsize,
    candidates: AtomicUsize,
    accepted: AtomicUsize,
}

impl RunStats {
    pub fn record_file_discovered(&self) {
        self.files_discovered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_file_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_candidate(&self) {
        self.candidates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, walk_errors: usize) -> RunSummary {
        RunSummary {
            files_discovered: self.files_discovered.load(Ordering::Relaxed),
            files_failed: self.files_failed.load(Ordering::Relaxed),
            walk_errors,
            candidates: self.candidates.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
        }
    }
}

/// Totals of a finished run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub files_discovered: usize,
    pub files_failed: usize,
    pub walk_errors: usize,
    pub candidates: usize,
    pub accepted: usize,
}
