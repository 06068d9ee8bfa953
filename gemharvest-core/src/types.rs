use std::path::PathBuf;

/// One post-like item from the subreddit's submission stream. Read-only
/// snapshot; the pipeline never mutates it.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: String,
    pub title: String,
    pub selftext: String,
    /// None when the author account is deleted.
    pub author: Option<String>,
    /// Unix timestamp, seconds.
    pub created_utc: i64,
    pub url: String,
}

/// A gem written to disk during this run.
#[derive(Debug, Clone)]
pub struct GemRecord {
    pub title: String,
    pub path: PathBuf,
}

/// Per-run result handed back to the caller, which owns presentation.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Whether the authenticated session was confirmed read-only.
    pub read_only: bool,
    /// Submissions pulled from the stream before the walk stopped.
    pub scanned: usize,
    /// Submissions that fell inside the target window.
    pub in_window: usize,
    pub gems: Vec<GemRecord>,
}

impl ExtractionReport {
    pub fn gem_count(&self) -> usize {
        self.gems.len()
    }
}
