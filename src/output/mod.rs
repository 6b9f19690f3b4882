//! Output formatting module
//! Renders match and extraction reports for the console, JSON and markdown

pub mod formatter;
pub mod report;

pub use formatter::{report_path, save_report_to_file, suggest_filename, ReportGenerator};
pub use report::{MatchReport, MatchSummary, ProfileReport, ReportMetadata};
