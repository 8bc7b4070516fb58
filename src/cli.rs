//! CLI interface for the resume matcher

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Compare a resume with a job description")]
#[command(long_about = "Assess how well a resume fits a job description using an LLM narrative and keyword overlap, and export the result as PDF")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a resume against a job description or job posting URL
    Match(MatchArgs),

    /// Run the built-in example
    Example {
        /// Only print the example payload
        #[arg(long)]
        show: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Fill in the job description, URL and resume at the prompt
    Interactive {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
pub struct MatchArgs {
    /// Job description text
    #[arg(short, long, conflicts_with = "job_file")]
    pub job: Option<String>,

    /// Job description file (TXT, MD, PDF)
    #[arg(long)]
    pub job_file: Option<PathBuf>,

    /// Job posting URL, used when no job description is given
    #[arg(short, long)]
    pub url: Option<String>,

    /// Resume text
    #[arg(short, long, conflicts_with = "resume_file")]
    pub resume: Option<String>,

    /// Resume file (TXT, MD, PDF)
    #[arg(long)]
    pub resume_file: Option<PathBuf>,

    /// Request id used in the exported file name (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Clone, Default)]
pub struct OutputArgs {
    /// Directory for the exported PDF
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output format: console, json
    #[arg(short, long)]
    pub output: Option<String>,

    /// Disable colored console output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}
