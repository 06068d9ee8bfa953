use gem_extractor::GemExtractor;
use gemharvest_core::{ExtractorConfig, MonthWindow};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemharvest=info,gem_extractor=info,reddit_client=info".into()),
        )
        .init();

    tracing::info!("Starting Gemharvest - Reddit prompt-gem extractor");

    // Single reporting boundary: every fault surfaces here, once.
    if let Err(e) = run().await {
        eprintln!("An error occurred: {e}");
    }
}

async fn run() -> Result<(), gemharvest_core::CoreError> {
    let config = ExtractorConfig::from_env()?;
    let window = MonthWindow::current()?;

    println!(
        "Searching for gems in r/{} ({})...",
        config.subreddit,
        window.label()
    );

    let extractor = GemExtractor::new(config, window);
    let report = extractor.run().await?;

    println!("Read only? {}", report.read_only);
    for gem in &report.gems {
        println!("Found potential gem: {}", gem.title);
    }
    println!(
        "Extraction complete. Found {} gems ({} submissions scanned, {} in window).",
        report.gem_count(),
        report.scanned,
        report.in_window
    );
    Ok(())
}
