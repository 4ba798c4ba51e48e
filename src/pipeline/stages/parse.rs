use crate::data_model::Document;
use crate::error::{PipelineError, Result};

/// Decodes one newline-delimited record into a `Document`.
///
/// The first malformed record aborts the whole stream; there is no
/// skip-and-continue mode.
pub struct ParseStage;

impl ParseStage {
    pub fn name(&self) -> &'static str {
        "ParseStage"
    }

    pub fn process(&self, record: &str) -> Result<Document> {
        serde_json::from_str::<Document>(record).map_err(|source| PipelineError::MalformedRecord {
            snippet: snippet(record),
            source,
        })
    }
}

// Cap the amount of raw input echoed into an error message.
fn snippet(record: &str) -> String {
    const MAX_CHARS: usize = 80;
    if record.chars().count() <= MAX_CHARS {
        record.to_string()
    } else {
        let mut s: String = record.chars().take(MAX_CHARS).collect();
        s.push_str("...");
        s
    }
}
