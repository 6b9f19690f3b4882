//! Report structures handed to the formatters

use crate::processing::attributes::TextAnalysis;
use crate::processing::matcher::{MatchBand, MatchResult};
use crate::processing::profile::{CandidateProfile, Profile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ranked jobs for one résumé
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub candidate: CandidateProfile,
    pub results: Vec<MatchResult>,
    pub summary: MatchSummary,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub jobs_considered: usize,
    pub jobs_reported: usize,
    pub best_match_percentage: Option<f64>,
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub matcher_version: String,
    pub resume_file: String,
    pub job_catalog: String,
    pub top_k: usize,
    pub processing_time_ms: u64,
}

/// Extracted facts for a single document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub source_file: String,
    pub profile: Profile,
    pub word_count: usize,
    pub char_count: usize,
}

impl MatchSummary {
    pub fn from_results(results: &[MatchResult], jobs_considered: usize) -> Self {
        let count = |band: MatchBand| results.iter().filter(|r| r.match_level == band).count();

        Self {
            jobs_considered,
            jobs_reported: results.len(),
            best_match_percentage: results.first().map(|r| r.match_percentage),
            excellent: count(MatchBand::Excellent),
            good: count(MatchBand::Good),
            fair: count(MatchBand::Fair),
            poor: count(MatchBand::Poor),
        }
    }
}

impl MatchReport {
    pub fn new(
        candidate: CandidateProfile,
        results: Vec<MatchResult>,
        jobs_considered: usize,
        metadata: ReportMetadata,
    ) -> Self {
        let summary = MatchSummary::from_results(&results, jobs_considered);
        Self {
            candidate,
            results,
            summary,
            metadata,
        }
    }
}

impl ReportMetadata {
    pub fn new(resume_file: &str, job_catalog: &str, top_k: usize, processing_time_ms: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            matcher_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: resume_file.to_string(),
            job_catalog: job_catalog.to_string(),
            top_k,
            processing_time_ms,
        }
    }
}

impl ProfileReport {
    pub fn new(source_file: &str, profile: Profile, analysis: &TextAnalysis) -> Self {
        Self {
            source_file: source_file.to_string(),
            profile,
            word_count: analysis.word_count,
            char_count: analysis.char_count,
        }
    }
}
