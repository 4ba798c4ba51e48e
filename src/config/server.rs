use std::path::PathBuf;

use clap::Parser;

// Define command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address to bind the HTTP listener to
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    pub bind_addr: String,

    /// Path to the pipeline configuration YAML file.
    #[arg(short = 'c', long, default_value = "config/pipeline_config.yaml")]
    pub pipeline_config: PathBuf,

    /// Validate the pipeline configuration and exit
    #[arg(long)]
    pub validate_config: bool,
}
