// src/config/mod.rs
use crate::error::{PipelineError, Result};
use crate::pipeline::readers::DEFAULT_MAX_RECORD_BYTES;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub mod client;
pub mod server;

/// Represents the overall pipeline configuration read from YAML.
///
/// The step list is ordered: stages run in exactly the order they are
/// declared, fixed for the lifetime of the pipeline. The parse and serialize
/// edges are implicit; only the document-to-document stages are configured.
#[derive(Deserialize, Debug, Clone)]
pub struct PipelineConfig {
    #[serde(default = "default_max_record_bytes")]
    pub max_record_bytes: usize,
    pub pipeline: Vec<StepConfig>,
}

fn default_max_record_bytes() -> usize {
    DEFAULT_MAX_RECORD_BYTES
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_record_bytes == 0 {
            return Err(PipelineError::ConfigValidationError(
                "max_record_bytes must be greater than 0".to_string(),
            ));
        }
        for step_config in &self.pipeline {
            step_config.validate()?;
        }
        Ok(())
    }
}

/// Represents a single stage in the processing pipeline.
/// Uses Serde's externally tagged enum representation.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type")] // The 'type' field in YAML determines which variant
pub enum StepConfig {
    ProjectField(ProjectFieldParams),
    SubstringFilter(SubstringFilterParams),
    // Add other stage types here as needed
}

impl StepConfig {
    /// Returns a string slice representing the name of the stage type.
    pub fn name(&self) -> &'static str {
        match self {
            StepConfig::ProjectField(_) => "ProjectField",
            StepConfig::SubstringFilter(_) => "SubstringFilter",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            StepConfig::ProjectField(params) => params.validate(),
            StepConfig::SubstringFilter(params) => params.validate(),
        }
    }
}

/// Parameters for the ProjectField stage.
#[derive(Deserialize, Debug, Clone)]
pub struct ProjectFieldParams {
    pub field: String,
}

impl ProjectFieldParams {
    pub fn validate(&self) -> Result<()> {
        if self.field.is_empty() {
            return Err(PipelineError::ConfigValidationError(
                "ProjectFieldParams: field cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters for the SubstringFilter stage.
#[derive(Deserialize, Debug, Clone)]
pub struct SubstringFilterParams {
    pub field: String,
    pub substring: String,
}

impl SubstringFilterParams {
    pub fn validate(&self) -> Result<()> {
        if self.field.is_empty() {
            return Err(PipelineError::ConfigValidationError(
                "SubstringFilterParams: field cannot be empty".to_string(),
            ));
        }
        if self.substring.is_empty() {
            // contains("") is vacuously true; an empty needle means the
            // filter was misconfigured, not that everything should pass
            return Err(PipelineError::ConfigValidationError(
                "SubstringFilterParams: substring cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads and parses the pipeline configuration YAML file.
pub fn load_pipeline_config<P: AsRef<Path>>(config_path: P) -> Result<PipelineConfig> {
    let path_ref = config_path.as_ref();
    let config_content = fs::read_to_string(path_ref).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to read pipeline config file '{}': {}",
            path_ref.display(),
            e
        ))
    })?;

    let config: PipelineConfig = serde_yaml::from_str(&config_content).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to parse pipeline config YAML from '{}': {}",
            path_ref.display(),
            e
        ))
    })?;

    config.validate()?; // Validate the loaded configuration

    Ok(config)
}
