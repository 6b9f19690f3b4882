//! Match scoring and ranking of requirements against a candidate
//!
//! Scoring:
//! - skill_match = |matched| / max(|required|, 1)
//! - experience_match = 1.0 when nothing is required or the candidate meets
//!   the requirement, otherwise linear partial credit
//! - combined = 0.6 * skill_match + 0.4 * experience_match
//!
//! The percentage is computed from the exact fractions and rounded to one
//! decimal. The fractions themselves are reported rounded to two decimals.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::processing::profile::{CandidateProfile, RequirementProfile};
use crate::processing::skills::Skill;

pub const SKILL_WEIGHT: f64 = 0.6;
pub const EXPERIENCE_WEIGHT: f64 = 0.4;

pub const EXCELLENT_THRESHOLD: f64 = 80.0;
pub const GOOD_THRESHOLD: f64 = 60.0;
pub const FAIR_THRESHOLD: f64 = 40.0;

/// Qualitative label for a match percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchBand {
    /// Lower bounds are inclusive: exactly 80.0 is excellent
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= EXCELLENT_THRESHOLD {
            MatchBand::Excellent
        } else if percentage >= GOOD_THRESHOLD {
            MatchBand::Good
        } else if percentage >= FAIR_THRESHOLD {
            MatchBand::Fair
        } else {
            MatchBand::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchBand::Excellent => "excellent",
            MatchBand::Good => "good",
            MatchBand::Fair => "fair",
            MatchBand::Poor => "poor",
        }
    }
}

impl fmt::Display for MatchBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scoring one requirement against the candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub requirement_id: String,
    pub title: String,
    pub company: String,
    pub match_percentage: f64,
    pub match_level: MatchBand,
    pub matched_skills: BTreeSet<Skill>,
    pub missing_skills: BTreeSet<Skill>,
    pub total_skills_matched: usize,
    pub total_skills_required: usize,
    pub skill_match: f64,
    pub experience_match: f64,
}

/// Fraction of required skills the candidate has; 0 when none are required
pub fn skill_match(matched: usize, required: usize) -> f64 {
    matched as f64 / required.max(1) as f64
}

pub fn experience_match(candidate_years: f64, required_years: f64) -> f64 {
    if required_years <= 0.0 || candidate_years >= required_years {
        1.0
    } else {
        candidate_years / required_years.max(1.0)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Score a single requirement. Neither profile is modified.
pub fn score(candidate: &CandidateProfile, requirement: &RequirementProfile) -> MatchResult {
    let required = requirement.required_skills();
    let matched_skills: BTreeSet<Skill> = candidate.skills().intersection(required).copied().collect();
    let missing_skills: BTreeSet<Skill> = required.difference(candidate.skills()).copied().collect();

    let skill_fraction = skill_match(matched_skills.len(), required.len());
    let experience_fraction =
        experience_match(candidate.experience_years(), requirement.experience_years_required());

    let combined = SKILL_WEIGHT * skill_fraction + EXPERIENCE_WEIGHT * experience_fraction;
    let match_percentage = round_to(combined * 100.0, 1);

    MatchResult {
        requirement_id: requirement.id().to_string(),
        title: requirement.display_field("title"),
        company: requirement.display_field("company"),
        match_percentage,
        match_level: MatchBand::from_percentage(match_percentage),
        total_skills_matched: matched_skills.len(),
        total_skills_required: required.len(),
        matched_skills,
        missing_skills,
        skill_match: round_to(skill_fraction, 2),
        experience_match: round_to(experience_fraction, 2),
    }
}

/// Score every requirement and return the best `top_k`, highest first.
///
/// The sort is stable: requirements with identical percentages keep their
/// input order. No secondary key is applied.
pub fn rank(
    candidate: &CandidateProfile,
    requirements: &[RequirementProfile],
    top_k: usize,
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = requirements
        .iter()
        .map(|requirement| score(candidate, requirement))
        .collect();

    results.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
    results.truncate(top_k);

    debug!(
        "Ranked {} requirements for '{}', returning {}",
        requirements.len(),
        candidate.id(),
        results.len()
    );
    results
}
