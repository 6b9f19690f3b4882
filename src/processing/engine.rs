//! Extraction and matching capability
//!
//! Callers that want the whole pipeline behind one handle depend on
//! `MatchEngine`; `KeywordMatchEngine` is the rule-based implementation.

use std::collections::BTreeSet;

use crate::processing::attributes::{analyze_text, extract_attributes, ExperienceAttributes, TextAnalysis};
use crate::processing::matcher::{rank, MatchResult};
use crate::processing::profile::{
    build_profile, CandidateProfile, Metadata, Profile, ProfileKind, RequirementProfile,
};
use crate::processing::skills::{extract_skills, Skill};
use crate::processing::text_processor::normalize;

pub trait MatchEngine {
    /// Skills found in raw text
    fn extract_skills(&self, text: &str) -> BTreeSet<Skill>;

    /// Years, management signal and education found in raw text
    fn extract_attributes(&self, text: &str) -> ExperienceAttributes;

    fn analyze(&self, text: &str) -> TextAnalysis;

    fn build_profile(
        &self,
        kind: ProfileKind,
        text: &str,
        id: Option<&str>,
        metadata: Option<Metadata>,
    ) -> Profile;

    fn rank(
        &self,
        candidate: &CandidateProfile,
        requirements: &[RequirementProfile],
        top_k: usize,
    ) -> Vec<MatchResult>;
}

/// Deterministic keyword and pattern engine
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordMatchEngine;

impl KeywordMatchEngine {
    pub fn new() -> Self {
        Self
    }

    /// Size of the skill vocabulary
    pub fn skill_count(&self) -> usize {
        Skill::ALL.len()
    }
}

impl MatchEngine for KeywordMatchEngine {
    fn extract_skills(&self, text: &str) -> BTreeSet<Skill> {
        extract_skills(&normalize(text))
    }

    fn extract_attributes(&self, text: &str) -> ExperienceAttributes {
        extract_attributes(&normalize(text))
    }

    fn analyze(&self, text: &str) -> TextAnalysis {
        analyze_text(text)
    }

    fn build_profile(
        &self,
        kind: ProfileKind,
        text: &str,
        id: Option<&str>,
        metadata: Option<Metadata>,
    ) -> Profile {
        build_profile(kind, text, id, metadata)
    }

    fn rank(
        &self,
        candidate: &CandidateProfile,
        requirements: &[RequirementProfile],
        top_k: usize,
    ) -> Vec<MatchResult> {
        rank(candidate, requirements, top_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::attributes::EducationLevel;

    #[test]
    fn test_engine_normalizes_raw_text() {
        let engine = KeywordMatchEngine::new();

        let skills = engine.extract_skills("PYTHON/Docker!!");
        assert_eq!(skills, BTreeSet::from([Skill::Python, Skill::Docker]));

        let attrs = engine.extract_attributes("Ph.D. holder; EXPERIENCE: 4 Years");
        assert_eq!(attrs.years, 4.0);
        assert_eq!(attrs.education, EducationLevel::Phd);
    }

    #[test]
    fn test_engine_pipeline() {
        let engine: &dyn MatchEngine = &KeywordMatchEngine::new();

        let candidate = engine
            .build_profile(ProfileKind::Candidate, "Python, SQL, 5 years of experience", None, None)
            .into_candidate()
            .unwrap();
        let jobs: Vec<RequirementProfile> = ["Python and SQL, 3 years experience", "React, JavaScript"]
            .iter()
            .enumerate()
            .filter_map(|(i, text)| {
                engine
                    .build_profile(ProfileKind::Requirement, text, Some(&format!("job-{i}")), None)
                    .into_requirement()
            })
            .collect();

        let ranked = engine.rank(&candidate, &jobs, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].requirement_id, "job-0");
        assert_eq!(ranked[0].match_percentage, 100.0);
        assert_eq!(ranked[1].match_percentage, 40.0);
    }

    #[test]
    fn test_skill_count() {
        assert_eq!(KeywordMatchEngine::new().skill_count(), 24);
    }
}
