use crate::api::RedditApiClient;
use async_trait::async_trait;
use gemharvest_core::{CoreError, MonthWindow, Submission, WindowCheck};
use std::collections::VecDeque;
use tracing::{debug, info};

const PAGE_SIZE: u32 = 100;

/// A pull-based, newest-first sequence of submissions. One item is
/// requested at a time; a fault aborts the walk and propagates.
#[async_trait]
pub trait SubmissionSource {
    async fn next(&mut self) -> Result<Option<Submission>, CoreError>;
}

/// Lazily pages `/r/<subreddit>/new`. Not restartable; every run
/// re-walks from "now".
pub struct SubmissionStream<'a> {
    client: &'a RedditApiClient,
    subreddit: String,
    after: Option<String>,
    buffer: VecDeque<Submission>,
    exhausted: bool,
}

impl<'a> SubmissionStream<'a> {
    pub fn new(client: &'a RedditApiClient, subreddit: &str) -> Self {
        Self {
            client,
            subreddit: subreddit.to_string(),
            after: None,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    async fn fetch_page(&mut self) -> Result<(), CoreError> {
        let listing = self
            .client
            .get_new_posts(&self.subreddit, PAGE_SIZE, self.after.as_deref())
            .await?;

        if listing.data.children.is_empty() {
            self.exhausted = true;
            return Ok(());
        }

        self.buffer
            .extend(listing.data.children.into_iter().map(|c| c.data.into()));

        // No cursor means the listing has no further pages.
        match listing.data.after {
            Some(cursor) => self.after = Some(cursor),
            None => self.exhausted = true,
        }
        Ok(())
    }
}

#[async_trait]
impl SubmissionSource for SubmissionStream<'_> {
    async fn next(&mut self) -> Result<Option<Submission>, CoreError> {
        if self.buffer.is_empty() && !self.exhausted {
            self.fetch_page().await?;
        }
        Ok(self.buffer.pop_front())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    Scanning,
    Stopped,
}

/// Walks a newest-first source and yields only submissions inside the
/// window. The first submission older than the window flips the walker
/// to `Stopped`: nothing further is requested from the source, since on
/// a reverse-chronological stream no later item can be in the window.
pub struct WindowedWalker<S> {
    source: S,
    window: MonthWindow,
    state: WalkState,
    pulled: usize,
}

impl<S: SubmissionSource> WindowedWalker<S> {
    pub fn new(source: S, window: MonthWindow) -> Self {
        Self {
            source,
            window,
            state: WalkState::Scanning,
            pulled: 0,
        }
    }

    /// Submissions requested from the source so far, including skipped
    /// ones and the one that stopped the walk.
    pub fn pulled(&self) -> usize {
        self.pulled
    }

    pub async fn next_in_window(&mut self) -> Result<Option<Submission>, CoreError> {
        if self.state == WalkState::Stopped {
            return Ok(None);
        }

        loop {
            let submission = match self.source.next().await? {
                Some(submission) => submission,
                None => {
                    debug!("Source exhausted after {} submissions", self.pulled);
                    self.state = WalkState::Stopped;
                    return Ok(None);
                }
            };
            self.pulled += 1;

            match self.window.check(submission.created_utc) {
                WindowCheck::Within => return Ok(Some(submission)),
                WindowCheck::Newer => {
                    debug!("Skipping submission newer than window: {}", submission.id);
                }
                WindowCheck::Older => {
                    info!(
                        "Reached submission older than {}; stopping walk",
                        self.window.label()
                    );
                    self.state = WalkState::Stopped;
                    return Ok(None);
                }
            }
        }
    }
}
