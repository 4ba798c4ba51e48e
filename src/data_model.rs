use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One parsed record: a JSON object mapping field names to values.
///
/// The transparent representation means a line that is valid JSON but not an
/// object (e.g. a bare number) fails at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Document {
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(fields: Map<String, Value>) -> Self {
        Document { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Result of pushing one record through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProcessingOutcome {
    /// The serialized record, newline included.
    Emitted(String),
    Filtered {
        document: Document,
        reason: String,
    },
}
