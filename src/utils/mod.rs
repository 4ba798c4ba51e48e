// Utils

pub mod prometheus_metrics;
