//! Job matcher: keyword-based resume to job matching tool

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use job_matcher::cli::{self, Cli, Commands, ConfigAction};
use job_matcher::config::{Config, OutputFormat};
use job_matcher::error::{MatcherError, Result};
use job_matcher::input::{InputManager, JobCatalog};
use job_matcher::output::{
    report_path, save_report_to_file, MatchReport, ProfileReport, ReportGenerator, ReportMetadata,
};
use job_matcher::processing::{build_candidate, KeywordMatchEngine, MatchEngine};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

const DOCUMENT_EXTENSIONS: [&str; 4] = ["pdf", "txt", "md", "markdown"];
const CATALOG_EXTENSIONS: [&str; 2] = ["toml", "json"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_file: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            jobs,
            top_k,
            output,
            save,
            detailed,
        } => {
            info!("Starting job matching");

            cli::validate_file_extension(&resume, &DOCUMENT_EXTENSIONS)
                .map_err(|e| MatcherError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&jobs, &CATALOG_EXTENSIONS)
                .map_err(|e| MatcherError::InvalidInput(format!("Job catalog: {}", e)))?;

            let output_format = resolve_output_format(output.as_deref(), &config)?;
            let top_k = top_k.unwrap_or(config.matching.top_k);
            if top_k == 0 {
                return Err(MatcherError::InvalidInput("--top-k must be at least 1".to_string()));
            }
            let detailed = detailed || config.output.detailed;

            let start_time = Instant::now();
            let engine = KeywordMatchEngine::new();
            info!("Matching against a vocabulary of {} skills", engine.skill_count());
            let mut input_manager = InputManager::new().with_cache(config.input.enable_cache);

            let resume_text = input_manager.extract_text(&resume).await?;
            let candidate = build_candidate(&resume_text, None, None);
            info!(
                "Resume profile: {} skills, {} years",
                candidate.skills().len(),
                candidate.experience_years()
            );

            let catalog = JobCatalog::load(&jobs).await?;
            let jobs_considered = catalog.len();
            let base_dir = jobs.parent().unwrap_or_else(|| Path::new("."));

            let spinner = progress_spinner(&format!("Profiling {} jobs", jobs_considered));
            let requirements = catalog.into_requirements(base_dir, &mut input_manager).await;
            spinner.finish_and_clear();
            let requirements = requirements?;

            let results = engine.rank(&candidate, &requirements, top_k);
            let elapsed_ms = start_time.elapsed().as_millis() as u64;
            info!("Ranked {} jobs in {}ms", jobs_considered, elapsed_ms);

            let metadata = ReportMetadata::new(
                &resume.to_string_lossy(),
                &jobs.to_string_lossy(),
                top_k,
                elapsed_ms,
            );
            let report = MatchReport::new(candidate, results, jobs_considered, metadata);

            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed, true, true);
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(target) => {
                    let path = report_path(&target, output_format, &resume.to_string_lossy());
                    save_report_to_file(&rendered, &path)?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Extract { input, kind, output } => {
            cli::validate_file_extension(&input, &DOCUMENT_EXTENSIONS)
                .map_err(|e| MatcherError::InvalidInput(format!("Input file: {}", e)))?;
            let output_format = resolve_output_format(output.as_deref(), &config)?;

            let engine = KeywordMatchEngine::new();
            let mut input_manager = InputManager::new().with_cache(config.input.enable_cache);
            let text = input_manager.extract_text(&input).await?;

            let analysis = engine.analyze(&text);
            let profile = engine.build_profile(kind, &text, None, None);
            info!("Extracted {} profile from {}", kind, input.display());

            let report = ProfileReport::new(&input.to_string_lossy(), profile, &analysis);
            let generator =
                ReportGenerator::with_options(config.output.color_output, config.output.detailed, true, true);
            println!("{}", generator.generate_profile(&report, output_format)?);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config File: {}", active_config_path(config_file).display());
                println!("\nMatching:");
                println!("  Top K: {}", config.matching.top_k);
                println!("\nInput:");
                println!("  Cache Enabled: {}", config.input.enable_cache);
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Detailed: {}", config.output.detailed);
                println!("  Colors: {}", config.output.color_output);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&active_config_path(config_file))?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", active_config_path(config_file).display());
            }
        },
    }

    Ok(())
}

fn resolve_output_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(MatcherError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn active_config_path(config_file: Option<PathBuf>) -> PathBuf {
    config_file.unwrap_or_else(Config::config_path)
}

fn progress_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
