pub mod line_reader;

pub use line_reader::{GzipLineReader, DEFAULT_MAX_RECORD_BYTES};
