use async_trait::async_trait;
use serde_json::Map;

use crate::data_model::Document;
use crate::error::{PipelineError, Result};
use crate::executor::RecordStage;

/// Narrows a document to a single configured field, preserving its value.
///
/// A record without the field is an error rather than an empty projection:
/// silently forwarding an absent value would break the filter stage's
/// precondition.
pub struct ProjectField {
    field: String,
}

impl ProjectField {
    pub fn new(field: String) -> Self {
        ProjectField { field }
    }
}

#[async_trait]
impl RecordStage for ProjectField {
    fn name(&self) -> &'static str {
        "ProjectField"
    }

    async fn process(&self, document: Document) -> Result<Document> {
        match document.get(&self.field) {
            Some(value) => {
                let mut fields = Map::new();
                fields.insert(self.field.clone(), value.clone());
                Ok(Document::new(fields))
            }
            None => Err(PipelineError::MissingField {
                field: self.field.clone(),
            }),
        }
    }
}
