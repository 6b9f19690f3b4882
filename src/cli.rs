//! CLI interface for the job matcher

use crate::config::OutputFormat;
use crate::processing::profile::ProfileKind;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "job-matcher")]
#[command(about = "Keyword-based resume to job matching tool")]
#[command(long_about = "Extract skills, experience and education from a resume and rank a catalog of job descriptions against it")]
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
    /// Rank jobs from a catalog against a resume
    Match {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job catalog (TOML, JSON)
        #[arg(short, long)]
        jobs: PathBuf,

        /// Number of ranked jobs to report
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include score breakdown per job
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show the facts extracted from a single document
    Extract {
        /// Path to the document (PDF, TXT, MD)
        #[arg(short, long)]
        input: PathBuf,

        /// Document kind: resume or job
        #[arg(long, default_value = "resume", value_parser = parse_profile_kind)]
        kind: ProfileKind,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
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
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

pub fn parse_profile_kind(kind: &str) -> Result<ProfileKind, String> {
    match kind.to_lowercase().as_str() {
        "resume" | "candidate" => Ok(ProfileKind::Candidate),
        "job" | "requirement" => Ok(ProfileKind::Requirement),
        _ => Err(format!("Invalid document kind: {}. Supported: resume, job", kind)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_parse_profile_kind() {
        assert_eq!(parse_profile_kind("job"), Ok(ProfileKind::Requirement));
        assert_eq!(parse_profile_kind("Resume"), Ok(ProfileKind::Candidate));
        assert!(parse_profile_kind("cover-letter").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["pdf", "txt", "md"];
        assert!(validate_file_extension(Path::new("cv.PDF"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("cv"), &allowed).is_err());
    }

    #[test]
    fn test_match_command_parses() {
        let cli = Cli::try_parse_from([
            "job-matcher", "match", "--resume", "cv.txt", "--jobs", "jobs.toml", "-k", "3", "--detailed",
        ])
        .unwrap();

        match cli.command {
            Commands::Match { top_k, detailed, output, .. } => {
                assert_eq!(top_k, Some(3));
                assert!(detailed);
                assert!(output.is_none());
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn test_extract_command_kind() {
        let cli = Cli::try_parse_from(["job-matcher", "extract", "-i", "job.md", "--kind", "job"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Extract { kind: ProfileKind::Requirement, .. }
        ));
    }
}
