use crate::error::Result;
use crate::transform::{byte_stream, RecordTransformer};
use crate::utils::prometheus_metrics::STREAMS_STARTED_TOTAL;

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use futures::TryStreamExt;
use prometheus::{Encoder, TextEncoder};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::io::StreamReader;
use tracing::{error, info};

// The application state, shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub transformer: Arc<RecordTransformer>,
}

pub fn app(transformer: Arc<RecordTransformer>) -> Router {
    let app_state = Arc::new(AppState { transformer });

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/metrics", get(metrics_handler))
        .route("/transform", post(transform_handler))
        .with_state(app_state)
}

/// Streams a gzip-compressed NDJSON request body through the pipeline into
/// the response body. Any duplex byte transport would do; HTTP is just the
/// binding bundled here. A mid-stream pipeline error truncates the response.
async fn transform_handler(State(state): State<Arc<AppState>>, body: Body) -> impl IntoResponse {
    STREAMS_STARTED_TOTAL.inc();

    let input = StreamReader::new(
        body.into_data_stream()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e)),
    );
    let output = byte_stream(state.transformer.clone(), input);

    (
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        Body::from_stream(output),
    )
}

// Axum handler for /metrics
async fn metrics_handler() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        error!("Could not encode prometheus metrics: {}", e);
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("Could not encode prometheus metrics: {}", e),
        );
    }
    match String::from_utf8(buffer) {
        Ok(s) => (axum::http::StatusCode::OK, s),
        Err(e) => {
            error!("Prometheus metrics UTF-8 error: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                format!("Prometheus metrics UTF-8 error: {}", e),
            )
        }
    }
}

// The main function to run the server
pub async fn run_server(addr: SocketAddr, transformer: Arc<RecordTransformer>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", addr);
    axum::serve(listener, app(transformer)).await?;
    Ok(())
}
