//! Output formatters for match and extraction reports

use crate::config::OutputFormat;
use crate::error::{MatcherError, Result};
use crate::output::report::{MatchReport, ProfileReport};
use crate::processing::matcher::{MatchBand, MatchResult};
use crate::processing::profile::Profile;
use crate::processing::skills::Skill;
use colored::{Color, Colorize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Trait for rendering reports in one output format
pub trait OutputFormatter {
    fn format_matches(&self, report: &MatchReport) -> Result<String>;
    fn format_profile(&self, report: &ProfileReport) -> Result<String>;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON for scripting and export
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn join_skills(skills: &BTreeSet<Skill>) -> String {
    if skills.is_empty() {
        "none".to_string()
    } else {
        skills.iter().map(Skill::as_str).collect::<Vec<_>>().join(", ")
    }
}

fn band_title(band: MatchBand) -> &'static str {
    match band {
        MatchBand::Excellent => "Excellent",
        MatchBand::Good => "Good",
        MatchBand::Fair => "Fair",
        MatchBand::Poor => "Poor",
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_band_badge(&self, band: MatchBand) -> String {
        let (icon, color) = match band {
            MatchBand::Excellent => ("🔥", Color::Green),
            MatchBand::Good => ("👍", Color::BrightGreen),
            MatchBand::Fair => ("⚠️", Color::Yellow),
            MatchBand::Poor => ("❌", Color::Red),
        };

        if self.use_colors {
            format!("{} [{}]", icon, band_title(band).to_uppercase().color(color).bold())
        } else {
            format!("[{}]", band_title(band).to_uppercase())
        }
    }

    fn format_result(&self, rank: usize, result: &MatchResult) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{}. {} @ {}  {:.1}% {}\n",
            rank,
            self.colorize(&result.title, Color::Cyan),
            result.company,
            result.match_percentage,
            self.format_band_badge(result.match_level)
        ));
        output.push_str(&format!(
            "   Skills: {}/{} matched\n",
            result.total_skills_matched, result.total_skills_required
        ));
        output.push_str(&format!(
            "   ✅ Matched: {}\n",
            self.colorize(&join_skills(&result.matched_skills), Color::Green)
        ));
        output.push_str(&format!(
            "   ⚠️  Missing: {}\n",
            self.colorize(&join_skills(&result.missing_skills), Color::Yellow)
        ));

        if self.detailed {
            output.push_str(&format!(
                "   Skill match: {:.2} | Experience match: {:.2} | Job id: {}\n",
                result.skill_match, result.experience_match, result.requirement_id
            ));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_matches(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("🎯 JOB MATCH RESULTS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Candidate", 2));
        let candidate = &report.candidate;
        output.push_str(&format!("Skills: {}\n", join_skills(candidate.skills())));
        output.push_str(&format!("Experience: {} years\n", candidate.experience_years()));
        output.push_str(&format!("Education: {}\n", candidate.education()));
        output.push_str(&format!(
            "Management: {}\n",
            if candidate.has_management() { "yes" } else { "no" }
        ));

        output.push_str(&self.format_header("Ranked Jobs", 2));
        if report.results.is_empty() {
            output.push_str("No jobs to rank.\n");
        }
        for (index, result) in report.results.iter().enumerate() {
            output.push_str(&self.format_result(index + 1, result));
        }

        output.push_str(&self.format_header("Summary", 3));
        let summary = &report.summary;
        output.push_str(&format!(
            "Showing {} of {} jobs (top {})\n",
            summary.jobs_reported, summary.jobs_considered, report.metadata.top_k
        ));
        output.push_str(&format!(
            "Excellent: {} | Good: {} | Fair: {} | Poor: {}\n",
            summary.excellent, summary.good, summary.fair, summary.poor
        ));

        Ok(output)
    }

    fn format_profile(&self, report: &ProfileReport) -> Result<String> {
        let mut output = String::new();
        let title = match report.profile {
            Profile::Candidate(_) => "📄 RESUME PROFILE",
            Profile::Requirement(_) => "💼 JOB PROFILE",
        };

        output.push_str(&self.format_header(title, 1));
        output.push_str(&format!("Source: {}\n", report.source_file));
        output.push_str(&format!("Id: {}\n", report.profile.id()));
        output.push_str(&format!(
            "Skills: {}\n",
            self.colorize(&join_skills(report.profile.skills()), Color::Green)
        ));

        match &report.profile {
            Profile::Candidate(candidate) => {
                output.push_str(&format!("Experience: {} years\n", candidate.experience_years()));
                output.push_str(&format!("Management: {}\n", candidate.has_management()));
                output.push_str(&format!("Education: {}\n", candidate.education()));
            }
            Profile::Requirement(requirement) => {
                output.push_str(&format!(
                    "Experience required: {} years\n",
                    requirement.experience_years_required()
                ));
                output.push_str(&format!(
                    "Management required: {}\n",
                    requirement.requires_management()
                ));
                output.push_str(&format!(
                    "Education required: {}\n",
                    requirement.education_required()
                ));
            }
        }

        if self.detailed {
            output.push_str(&format!(
                "Words: {} | Characters: {}\n",
                report.word_count, report.char_count
            ));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_matches(&self, report: &MatchReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_profile(&self, report: &ProfileReport) -> Result<String> {
        self.to_json(report)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    /// Pipes would break the table layout
    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_matches(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let candidate = &report.candidate;

        output.push_str("# Job Match Results\n\n");
        output.push_str("## Candidate\n\n");
        output.push_str(&format!("- **Skills:** {}\n", join_skills(candidate.skills())));
        output.push_str(&format!("- **Experience:** {} years\n", candidate.experience_years()));
        output.push_str(&format!("- **Education:** {}\n", candidate.education()));
        output.push_str(&format!("- **Management:** {}\n\n", candidate.has_management()));

        output.push_str("## Ranked Jobs\n\n");
        if report.results.is_empty() {
            output.push_str("_No jobs to rank._\n");
        } else {
            output.push_str("| # | Title | Company | Match | Level | Matched | Missing |\n");
            output.push_str("|---|-------|---------|-------|-------|---------|---------|\n");
            for (index, result) in report.results.iter().enumerate() {
                output.push_str(&format!(
                    "| {} | {} | {} | {:.1}% | {} | {} | {} |\n",
                    index + 1,
                    Self::escape_cell(&result.title),
                    Self::escape_cell(&result.company),
                    result.match_percentage,
                    band_title(result.match_level),
                    join_skills(&result.matched_skills),
                    join_skills(&result.missing_skills)
                ));
            }
        }

        if self.include_metadata {
            let metadata = &report.metadata;
            output.push_str("\n---\n\n");
            output.push_str(&format!(
                "_Generated {} by job-matcher {} from `{}` and `{}` in {}ms._\n",
                metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                metadata.matcher_version,
                metadata.resume_file,
                metadata.job_catalog,
                metadata.processing_time_ms
            ));
        }

        Ok(output)
    }

    fn format_profile(&self, report: &ProfileReport) -> Result<String> {
        let mut output = String::new();
        let heading = match report.profile {
            Profile::Candidate(_) => "Resume Profile",
            Profile::Requirement(_) => "Job Profile",
        };

        output.push_str(&format!("# {}\n\n", heading));
        output.push_str(&format!("- **Source:** `{}`\n", report.source_file));
        output.push_str(&format!("- **Id:** {}\n", report.profile.id()));
        output.push_str(&format!("- **Skills:** {}\n", join_skills(report.profile.skills())));

        match &report.profile {
            Profile::Candidate(candidate) => {
                output.push_str(&format!("- **Experience:** {} years\n", candidate.experience_years()));
                output.push_str(&format!("- **Management:** {}\n", candidate.has_management()));
                output.push_str(&format!("- **Education:** {}\n", candidate.education()));
            }
            Profile::Requirement(requirement) => {
                output.push_str(&format!(
                    "- **Experience required:** {} years\n",
                    requirement.experience_years_required()
                ));
                output.push_str(&format!(
                    "- **Management required:** {}\n",
                    requirement.requires_management()
                ));
                output.push_str(&format!(
                    "- **Education required:** {}\n",
                    requirement.education_required()
                ));
            }
        }

        Ok(output)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_matches(report)
    }

    pub fn generate_profile(&self, report: &ProfileReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_profile(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content).map_err(|e| {
        MatcherError::OutputFormatting(format!("Failed to write {}: {}", file_path.display(), e))
    })
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_matches{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_matches{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_matches{}.md", base_name, timestamp_suffix),
    }
}

/// Where `--save` writes: the target itself, or a generated name inside it
/// when the target is an existing directory
pub fn report_path(target: &Path, format: OutputFormat, resume_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, resume_name, true))
    } else {
        target.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ReportMetadata;
    use crate::processing::attributes::analyze_text;
    use crate::processing::matcher::rank;
    use crate::processing::profile::{build_candidate, build_profile, build_requirement, Metadata, ProfileKind};
    use serde_json::json;

    fn sample_report() -> MatchReport {
        let candidate = build_candidate("Python developer, 3 years experience, AWS, Docker", None, None);

        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!("ML | Platform Engineer"));
        metadata.insert("company".to_string(), json!("TechCorp"));
        let jobs = vec![
            build_requirement("Python, AWS and TensorFlow. 2 years of experience", Some("ml"), Some(metadata)),
            build_requirement("React and JavaScript", Some("web"), None),
        ];

        let results = rank(&candidate, &jobs, 5);
        MatchReport::new(candidate, results, jobs.len(), ReportMetadata::new("resume.txt", "jobs.toml", 5, 3))
    }

    #[test]
    fn test_console_without_colors() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_matches(&sample_report()).unwrap();

        assert!(output.contains("JOB MATCH RESULTS"));
        assert!(output.contains("1. ML | Platform Engineer @ TechCorp  80.0% [EXCELLENT]"));
        assert!(output.contains("Missing: tensorflow"));
        assert!(output.contains("Unknown"));
        assert!(output.contains("Skill match: 0.67 | Experience match: 1.00"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_json_round_trips_results() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_matches(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["results"][0]["requirement_id"], "ml");
        assert_eq!(value["results"][0]["match_percentage"], 80.0);
        assert_eq!(value["results"][0]["match_level"], "excellent");
        assert_eq!(value["summary"]["jobs_considered"], 2);
    }

    #[test]
    fn test_markdown_table_escapes_pipes() {
        let formatter = MarkdownFormatter::new(false);
        let output = formatter.format_matches(&sample_report()).unwrap();

        assert!(output.contains("| 1 | ML \\| Platform Engineer | TechCorp | 80.0% | Excellent |"));
        assert!(!output.contains("Generated"));
    }

    #[test]
    fn test_profile_formats() {
        let text = "Engineering manager, 3-5 years of experience with Kubernetes";
        let analysis = analyze_text(text);
        let profile = build_profile(ProfileKind::Requirement, text, None, None);
        let report = ProfileReport::new("job.txt", profile, &analysis);

        let generator = ReportGenerator::with_options(false, true, true, true);
        let console = generator.generate_profile(&report, OutputFormat::Console).unwrap();
        assert!(console.contains("JOB PROFILE"));
        assert!(console.contains("Skills: kubernetes"));
        assert!(console.contains("Experience required: 4 years"));
        assert!(console.contains("Management required: true"));

        let markdown = generator.generate_profile(&report, OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# Job Profile"));

        let json = generator.generate_profile(&report, OutputFormat::Json).unwrap();
        assert!(json.contains("\"kind\": \"requirement\""));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Json, "cv/jane_resume.pdf", false),
            "jane_resume_matches.json"
        );
        assert_eq!(
            suggest_filename(OutputFormat::Markdown, "resume.txt", false),
            "resume_matches.md"
        );
    }

    #[test]
    fn test_report_path_into_directory() {
        let dir = tempfile::tempdir().unwrap();

        let generated = report_path(dir.path(), OutputFormat::Markdown, "cv/jane.pdf");
        assert_eq!(generated.parent(), Some(dir.path()));
        let name = generated.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("jane_matches_"));
        assert!(name.ends_with(".md"));

        let explicit = dir.path().join("out.json");
        assert_eq!(report_path(&explicit, OutputFormat::Json, "jane.pdf"), explicit);
    }

    #[test]
    fn test_save_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.md");
        save_report_to_file("# hello", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hello");
    }
}
