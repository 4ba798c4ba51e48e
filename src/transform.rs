// src/transform.rs

use crate::config::{PipelineConfig, StepConfig};
use crate::data_model::ProcessingOutcome;
use crate::error::{PipelineError, Result};
use crate::executor::{PipelineExecutor, RecordStage};
use crate::pipeline::readers::GzipLineReader;
use crate::pipeline::stages::{ParseStage, ProjectField, SerializeStage, SubstringFilter};
use crate::pipeline::writers::LineWriter;
use crate::utils::prometheus_metrics::*;

use bytes::Bytes;
use futures::Stream;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, error, info, info_span, instrument, warn};

/// Builds the ordered stage list from the configuration read from YAML.
#[instrument(skip(config), fields(num_steps = config.pipeline.len()))]
pub fn build_stages_from_config(config: &PipelineConfig) -> Result<Vec<Box<dyn RecordStage>>> {
    let mut steps: Vec<Box<dyn RecordStage>> = Vec::new();
    info!("Building pipeline from configuration...");

    for (i, step_config) in config.pipeline.iter().enumerate() {
        let step_span = info_span!("pipeline_step", index = i, stage = step_config.name());
        let _enter = step_span.enter();

        let step: Box<dyn RecordStage> = match step_config {
            StepConfig::ProjectField(params) => {
                debug!(params = ?params, "Adding ProjectField");
                Box::new(ProjectField::new(params.field.clone()))
            }
            StepConfig::SubstringFilter(params) => {
                debug!(params = ?params, "Adding SubstringFilter");
                Box::new(SubstringFilter::new(
                    params.field.clone(),
                    params.substring.clone(),
                ))
            }
        };
        steps.push(step);
        info!("Added stage: {}", step_config.name());
    }

    if steps.is_empty() {
        warn!("Warning: Building an empty pipeline from configuration!");
    } else {
        info!("Pipeline built successfully with {} stages.", steps.len());
    }
    Ok(steps)
}

/// Counters for one completed stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    pub records_in: u64,
    pub records_out: u64,
    pub records_filtered: u64,
}

/// The end-to-end record pipeline: gunzip, split into records, parse,
/// run the configured stages, re-serialize.
///
/// Stage order is fixed at construction; the configuration is immutable for
/// the transformer's lifetime, so one instance can serve any number of
/// sequential or concurrent streams.
pub struct RecordTransformer {
    parse: ParseStage,
    executor: PipelineExecutor,
    serialize: SerializeStage,
    max_record_bytes: usize,
}

impl RecordTransformer {
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let steps = build_stages_from_config(config)?;
        Ok(RecordTransformer {
            parse: ParseStage,
            executor: PipelineExecutor::new(steps),
            serialize: SerializeStage,
            max_record_bytes: config.max_record_bytes,
        })
    }

    pub fn num_stages(&self) -> usize {
        self.executor.num_steps()
    }

    /// Pushes one record through every stage.
    ///
    /// A drop signalled by a filter stage comes back as
    /// `ProcessingOutcome::Filtered`; any other stage failure is a stream
    /// abort and is propagated to the caller.
    pub async fn transform_record(&self, record: &str) -> Result<ProcessingOutcome> {
        RECORDS_PROCESSED_TOTAL.inc();
        let processing_timer = RECORD_PROCESSING_DURATION_SECONDS.start_timer();

        let result = self.run_record(record).await;

        processing_timer.observe_duration();
        if result.is_err() {
            RECORDS_FAILED_TOTAL.inc();
        }
        result
    }

    async fn run_record(&self, record: &str) -> Result<ProcessingOutcome> {
        let document = self.parse.process(record)?;

        match self.executor.run_single_async(document).await {
            Ok(processed) => {
                let line = self.serialize.process(&processed)?;
                RECORDS_EMITTED_TOTAL.inc();
                Ok(ProcessingOutcome::Emitted(line))
            }
            Err(PipelineError::StepError { step_name, source }) => match *source {
                PipelineError::RecordFiltered { document, reason } => {
                    debug!(%step_name, %reason, "Record was filtered");
                    RECORDS_FILTERED_TOTAL.inc();
                    Ok(ProcessingOutcome::Filtered { document, reason })
                }
                other => {
                    error!(%step_name, error = %other, "Pipeline stage failed");
                    Err(PipelineError::StepError {
                        step_name,
                        source: Box::new(other),
                    })
                }
            },
            Err(e) => {
                error!(error = %e, "Unexpected pipeline error");
                Err(e)
            }
        }
    }

    /// Runs a whole gzip-compressed byte stream through the pipeline into an
    /// output sink.
    ///
    /// One record is in flight at a time: the awaited write/flush of each
    /// emitted record gates the next read, so sink backpressure propagates
    /// all the way to the input source. Output order equals input order minus
    /// filtered records. The first stage error aborts the loop; output
    /// already flushed stays flushed, nothing further is written.
    pub async fn transform_stream<R, W>(&self, input: R, output: W) -> Result<StreamSummary>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let _active = ActiveStream::start();
        let mut records = GzipLineReader::new(input, self.max_record_bytes);
        let mut writer = LineWriter::new(output);
        let mut summary = StreamSummary::default();

        while let Some(record) = records.next_record().await {
            let record = record?;
            summary.records_in += 1;

            match self.transform_record(&record).await? {
                ProcessingOutcome::Emitted(line) => {
                    writer.write_record(&line).await?;
                    summary.records_out += 1;
                }
                ProcessingOutcome::Filtered { .. } => summary.records_filtered += 1,
            }
        }

        debug!(
            records_in = summary.records_in,
            records_out = summary.records_out,
            records_filtered = summary.records_filtered,
            "Stream complete"
        );
        Ok(summary)
    }
}

/// Same loop as `transform_stream`, exposed as a lazy byte stream for
/// mounting on a response body. The consumer polling the stream is what
/// drives the pipeline, so transport backpressure applies directly. An error
/// ends the stream after yielding it; the transport surfaces that as a
/// truncated body.
pub fn byte_stream<R>(
    transformer: Arc<RecordTransformer>,
    input: R,
) -> impl Stream<Item = Result<Bytes>> + Send
where
    R: AsyncRead + Unpin + Send + 'static,
{
    async_stream::try_stream! {
        let _active = ActiveStream::start();
        let mut records = GzipLineReader::new(input, transformer.max_record_bytes);

        while let Some(record) = records.next_record().await {
            let record = record.map_err(|e| {
                error!(error = %e, "Record framing failed");
                e
            })?;

            match transformer.transform_record(&record).await? {
                ProcessingOutcome::Emitted(line) => yield Bytes::from(line),
                ProcessingOutcome::Filtered { .. } => {}
            }
        }
    }
}

// Gauge guard so cancelled and failed streams are still counted down.
struct ActiveStream;

impl ActiveStream {
    fn start() -> Self {
        ACTIVE_STREAMS.inc();
        ActiveStream
    }
}

impl Drop for ActiveStream {
    fn drop(&mut self) {
        ACTIVE_STREAMS.dec();
    }
}
