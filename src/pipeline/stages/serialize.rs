use crate::data_model::Document;
use crate::error::{PipelineError, Result};

/// Encodes a document back into one newline-terminated record.
pub struct SerializeStage;

impl SerializeStage {
    pub fn name(&self) -> &'static str {
        "SerializeStage"
    }

    pub fn process(&self, document: &Document) -> Result<String> {
        let mut record = serde_json::to_string(document)
            .map_err(|source| PipelineError::EncodingError { source })?;
        record.push('\n');
        Ok(record)
    }
}
