use anyhow::{Context, Result};
use atlas_content_client::{
    ClientConfig, ContentClient, ContentRecord, Source, submit_and_report,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn example_record() -> ContentRecord {
    ContentRecord::new(
        "The Future of Sovereign Intelligence",
        "In an era of centralized algorithms, local knowledge engines become the ultimate leverage...",
        "business",
    )
    .with_tags(["intelligence", "sovereignty", "technology"])
    .with_source(Source::new(
        "Sovereign Individual",
        "https://example.com/book",
        "book",
    ))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ClientConfig::load().context("loading Atlas client configuration")?;
    let client = ContentClient::new(config);
    info!(endpoint = client.endpoint(), "posting example content");

    // Submission failures are reported, not fatal.
    submit_and_report(&client, &example_record()).await;
    Ok(())
}
