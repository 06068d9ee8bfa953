use crate::classify::is_gem;
use crate::document::DocumentWriter;
use gemharvest_core::{CoreError, ExtractionReport, ExtractorConfig, GemRecord, MonthWindow};
use reddit_client::{RedditApiClient, SubmissionSource, SubmissionStream, WindowedWalker};
use tracing::{debug, info};

/// Drives the windowed walk over a submission source, classifying each
/// in-window item and persisting matches. Strictly sequential: one
/// submission is fetched, classified and written before the next is
/// requested.
pub async fn extract_gems<S: SubmissionSource>(
    source: S,
    window: MonthWindow,
    writer: &DocumentWriter,
) -> Result<ExtractionReport, CoreError> {
    let mut walker = WindowedWalker::new(source, window);
    let mut report = ExtractionReport::default();

    while let Some(submission) = walker.next_in_window().await? {
        report.in_window += 1;

        if !is_gem(&submission) {
            debug!("Not a gem: {}", submission.title);
            continue;
        }

        info!("Found potential gem: {}", submission.title);
        let path = writer.write_gem(&submission).await?;
        report.gems.push(GemRecord {
            title: submission.title,
            path,
        });
    }

    report.scanned = walker.pulled();
    Ok(report)
}

/// Top-level extraction run: owns the client and wiring, delegates the
/// pipeline to [`extract_gems`].
pub struct GemExtractor {
    config: ExtractorConfig,
    window: MonthWindow,
}

impl GemExtractor {
    pub fn new(config: ExtractorConfig, window: MonthWindow) -> Self {
        Self { config, window }
    }

    pub async fn run(&self) -> Result<ExtractionReport, CoreError> {
        let mut client = RedditApiClient::new(self.config.user_agent.clone())?;
        client
            .authenticate(&self.config.client_id, &self.config.client_secret)
            .await?;
        let read_only = client.read_only();
        info!(
            "Scanning r/{} for gems in {} (read-only: {})",
            self.config.subreddit,
            self.window.label(),
            read_only
        );

        let writer = DocumentWriter::new(&self.config.output_dir);
        let stream = SubmissionStream::new(&client, &self.config.subreddit);

        let mut report = extract_gems(stream, self.window, &writer).await?;
        report.read_only = read_only;
        Ok(report)
    }
}
