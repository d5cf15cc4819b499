// File: src/pipeline/mod.rs
//! Sequential, rate-limited batch jobs. An item that fails is logged and
//! skipped; the batch always runs to the end and reports what happened.

pub mod audio;
pub mod images;
pub mod sentences;
pub mod text;

use log::info;
use std::path::Path;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn success(&mut self) {
        self.processed += 1;
        self.succeeded += 1;
    }

    pub fn skip(&mut self) {
        self.processed += 1;
        self.skipped += 1;
    }

    pub fn failure(&mut self) {
        self.processed += 1;
        self.failed += 1;
    }

    pub fn log_summary(&self, job: &str) {
        info!(
            "{}: {} processed, {} succeeded, {} skipped, {} failed",
            job, self.processed, self.succeeded, self.skipped, self.failed
        );
    }
}

/// Fixed pause after every external call, to stay under provider rate limits.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn none() -> Self {
        Self { delay: Duration::ZERO }
    }

    pub fn pause(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

/// Filesystem-safe version of a `chat` stem.
pub fn file_stem(chat: &str) -> String {
    chat.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Forward-slash path string as stored in JSON.
pub fn path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
