use async_trait::async_trait;
use serde_json::Value;

use crate::data_model::Document;
use crate::error::{PipelineError, Result};
use crate::executor::RecordStage;

/// Keeps a document only when its configured field contains the configured
/// substring, compared case-insensitively. The sole stage that drops records;
/// it never reorders and never mutates a document that passes.
pub struct SubstringFilter {
    field: String,
    substring: String,
    // substring lowercased once at construction
    needle: String,
}

impl SubstringFilter {
    pub fn new(field: String, substring: String) -> Self {
        let needle = substring.to_lowercase();
        SubstringFilter {
            field,
            substring,
            needle,
        }
    }
}

#[async_trait]
impl RecordStage for SubstringFilter {
    fn name(&self) -> &'static str {
        "SubstringFilter"
    }

    async fn process(&self, document: Document) -> Result<Document> {
        let value = match document.get(&self.field) {
            Some(value) => value.clone(),
            None => {
                return Err(PipelineError::MissingField {
                    field: self.field.clone(),
                })
            }
        };

        let text = match value {
            Value::String(s) => s,
            _ => {
                return Err(PipelineError::FieldNotString {
                    field: self.field.clone(),
                })
            }
        };

        if text.to_lowercase().contains(&self.needle) {
            Ok(document)
        } else {
            let reason = format!(
                "Field '{}' does not contain '{}'",
                self.field, self.substring
            );
            Err(PipelineError::RecordFiltered { document, reason })
        }
    }
}
