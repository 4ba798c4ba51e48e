use async_compression::tokio::bufread::GzipEncoder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, BufReader};
use StreamSift::config::{PipelineConfig, ProjectFieldParams, StepConfig, SubstringFilterParams};
use StreamSift::pipeline::readers::DEFAULT_MAX_RECORD_BYTES;
use StreamSift::server::app;
use StreamSift::transform::RecordTransformer;

async fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzipEncoder::new(BufReader::new(data));
    let mut compressed = Vec::new();
    encoder
        .read_to_end(&mut compressed)
        .await
        .expect("gzip encoding should succeed");
    compressed
}

// Spawn the app on an ephemeral port and return its address.
async fn spawn_server() -> SocketAddr {
    let config = PipelineConfig {
        max_record_bytes: DEFAULT_MAX_RECORD_BYTES,
        pipeline: vec![
            StepConfig::ProjectField(ProjectFieldParams {
                field: "title".to_string(),
            }),
            StepConfig::SubstringFilter(SubstringFilterParams {
                field: "title".to_string(),
                substring: "javascript".to_string(),
            }),
        ],
    };
    let transformer = Arc::new(RecordTransformer::from_config(&config).unwrap());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port should bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app(transformer)).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn test_health_endpoint() {
    let addr = spawn_server().await;
    let response = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_transform_round_trip() {
    let addr = spawn_server().await;

    let input = concat!(
        "{\"title\":\"Intro to JavaScript\"}\n",
        "{\"title\":\"Cooking 101\"}\n",
        "{\"title\":\"Advanced javascript tips\"}\n",
    );
    let compressed = gzip(input.as_bytes()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/transform", addr))
        .body(compressed)
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.text().await.unwrap(),
        "{\"title\":\"Intro to JavaScript\"}\n{\"title\":\"Advanced javascript tips\"}\n"
    );
}

#[tokio::test]
async fn test_transform_empty_body() {
    let addr = spawn_server().await;
    let compressed = gzip(b"").await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/transform", addr))
        .body(compressed)
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "");
}

#[tokio::test]
async fn test_malformed_record_truncates_the_response() {
    let addr = spawn_server().await;

    let input = concat!(
        "{\"title\":\"javascript first\"}\n",
        "not-json\n",
        "{\"title\":\"javascript never seen\"}\n",
    );
    let compressed = gzip(input.as_bytes()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/transform", addr))
        .body(compressed)
        .send()
        .await
        .unwrap();

    // Headers went out before the pipeline hit the malformed record; the
    // failure shows up as an aborted body, not a status code.
    assert!(response.status().is_success());
    assert!(response.bytes().await.is_err());
}
