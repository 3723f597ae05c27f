//! Archive record input
//!
//! Records arrive as JSON Lines: one flat JSON object per line, as emitted by
//! the weather station host. Blank lines and `#` comments are ignored.

use std::path::Path;

use anyhow::{Context, Result};
use domain::{ArchiveRecord, DomainError};
use integration_rainmachine::{ForwardOutcome, SkipReason};
use tokio::io::{AsyncBufRead, BufReader};

/// Open the record source: a file when `path` is given, stdin otherwise
pub async fn open_input(path: Option<&Path>) -> Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    match path {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        },
        None => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
    }
}

/// Parse one input line
///
/// Returns `Ok(None)` for lines that carry no record.
pub fn parse_record_line(line: &str) -> Result<Option<ArchiveRecord>, DomainError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    ArchiveRecord::from_json(line).map(Some)
}

/// Tally of record outcomes for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub posted: usize,
    pub skipped: usize,
    pub disabled: usize,
    pub dropped: usize,
    pub invalid: usize,
}

impl RunSummary {
    /// Count a forwarding outcome
    pub const fn record(&mut self, outcome: &ForwardOutcome) {
        match outcome {
            ForwardOutcome::Posted { .. } => self.posted += 1,
            ForwardOutcome::Skipped(SkipReason::UploadDisabled) => self.disabled += 1,
            ForwardOutcome::Skipped(_) => self.skipped += 1,
            ForwardOutcome::Dropped(_) => self.dropped += 1,
        }
    }

    /// Count a line that could not be decoded
    pub const fn record_invalid(&mut self) {
        self.invalid += 1;
    }

    /// Total lines that carried something
    pub const fn total(&self) -> usize {
        self.posted + self.skipped + self.disabled + self.dropped + self.invalid
    }
}
