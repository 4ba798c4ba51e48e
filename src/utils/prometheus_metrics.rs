// src/utils/prometheus_metrics.rs

use once_cell::sync::Lazy;
use prometheus::{register_counter, register_gauge, register_histogram, Counter, Gauge, Histogram};

pub static RECORDS_PROCESSED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "pipeline_records_processed_total",
        "Total number of records pulled through the pipeline."
    )
    .expect("Failed to register pipeline_records_processed_total counter")
});

pub static RECORDS_EMITTED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "pipeline_records_emitted_total",
        "Total number of records that passed every stage and were written out."
    )
    .expect("Failed to register pipeline_records_emitted_total counter")
});

pub static RECORDS_FILTERED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "pipeline_records_filtered_total",
        "Total number of records dropped by a filter stage."
    )
    .expect("Failed to register pipeline_records_filtered_total counter")
});

pub static RECORDS_FAILED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "pipeline_records_failed_total",
        "Total number of records that aborted their stream with an error."
    )
    .expect("Failed to register pipeline_records_failed_total counter")
});

pub static RECORD_PROCESSING_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "pipeline_record_processing_duration_seconds",
        "Histogram of per-record processing durations (parse to serialized output)."
    )
    .expect("Failed to register pipeline_record_processing_duration_seconds histogram")
});

pub static STREAMS_STARTED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "server_streams_started_total",
        "Total number of transform streams accepted by the server."
    )
    .expect("Failed to register server_streams_started_total counter")
});

pub static ACTIVE_STREAMS: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!(
        "server_active_streams",
        "Number of transform streams currently in flight."
    )
    .expect("Failed to register server_active_streams gauge")
});
