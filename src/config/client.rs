use std::path::PathBuf;

use clap::Parser;

// Define command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the newline-delimited JSON file to upload
    #[arg(short, long)]
    pub input: PathBuf,

    /// URL of the transform endpoint
    #[arg(short, long, default_value = "http://127.0.0.1:3000/transform")]
    pub url: String,
}
