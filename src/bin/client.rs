// src/bin/client.rs

use async_compression::tokio::bufread::GzipEncoder;
use clap::Parser;
use futures::StreamExt;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio_util::io::ReaderStream;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use StreamSift::config::client::Args;
use StreamSift::error::{PipelineError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")); // Default to info if RUST_LOG is not set
    fmt::Subscriber::builder().with_env_filter(filter).init();

    info!(
        "Uploading '{}' to {} (gzip-compressed on the fly)",
        args.input.display(),
        args.url
    );

    let file = tokio::fs::File::open(&args.input).await?;
    // Compress lazily while the request body is being pulled; nothing is
    // buffered beyond the encoder's working window.
    let encoder = GzipEncoder::new(BufReader::new(file));
    let body = reqwest::Body::wrap_stream(ReaderStream::new(encoder));

    let client = reqwest::Client::new();
    let response = client
        .post(&args.url)
        .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
        .body(body)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(PipelineError::TransportError(format!(
            "Server responded with {}",
            response.status()
        )));
    }

    // Stream the filtered records to stdout as they arrive.
    let mut stdout = tokio::io::stdout();
    let mut chunks = response.bytes_stream();
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        stdout.write_all(&chunk).await?;
    }
    stdout.flush().await?;

    Ok(())
}
