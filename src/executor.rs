use crate::data_model::Document;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

// Use async_trait for async stages
#[async_trait]
pub trait RecordStage: Send + Sync {
    // Send + Sync needed for sharing one stage set across streams
    fn name(&self) -> &'static str; // For logging/error reporting

    async fn process(&self, document: Document) -> Result<Document>;
}

/// Runs the configured document-to-document stages in their declared order.
///
/// The order is fixed at construction; a stage that drops a record signals it
/// with `PipelineError::RecordFiltered`, every other error aborts the stream.
pub struct PipelineExecutor {
    steps: Vec<Box<dyn RecordStage>>,
}

impl PipelineExecutor {
    pub fn new(steps: Vec<Box<dyn RecordStage>>) -> Self {
        if steps.is_empty() {
            warn!("Pipeline created with no steps.");
        }
        PipelineExecutor { steps }
    }

    pub fn num_steps(&self) -> usize {
        self.steps.len()
    }

    pub async fn run_single_async(&self, initial_document: Document) -> Result<Document> {
        let mut current_doc = initial_document;
        for step in &self.steps {
            debug!("Running stage: {}", step.name());

            current_doc =
                step.process(current_doc)
                    .await
                    .map_err(|e| PipelineError::StepError {
                        step_name: step.name().to_string(),
                        source: Box::new(e),
                    })?;
        }
        Ok(current_doc)
    }
}
