//! Candidate and requirement profiles built from free text

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::processing::attributes::{extract_attributes, EducationLevel};
use crate::processing::skills::{extract_skills, Skill};
use crate::processing::text_processor::normalize;

/// Opaque caller data carried on a profile. Only `title` and `company` are
/// ever read, and only when rendering match results.
pub type Metadata = BTreeMap<String, Value>;

pub const DEFAULT_CANDIDATE_ID: &str = "resume_1";
pub const DEFAULT_REQUIREMENT_ID: &str = "job_1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Candidate,
    Requirement,
}

impl ProfileKind {
    pub fn default_id(&self) -> &'static str {
        match self {
            ProfileKind::Candidate => DEFAULT_CANDIDATE_ID,
            ProfileKind::Requirement => DEFAULT_REQUIREMENT_ID,
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileKind::Candidate => write!(f, "candidate"),
            ProfileKind::Requirement => write!(f, "requirement"),
        }
    }
}

/// Résumé side of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    id: String,
    skills: BTreeSet<Skill>,
    experience_years: f64,
    has_management: bool,
    education: EducationLevel,
    metadata: Metadata,
}

impl CandidateProfile {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn skills(&self) -> &BTreeSet<Skill> {
        &self.skills
    }

    pub fn experience_years(&self) -> f64 {
        self.experience_years
    }

    pub fn has_management(&self) -> bool {
        self.has_management
    }

    pub fn education(&self) -> EducationLevel {
        self.education
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// Job side of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementProfile {
    id: String,
    required_skills: BTreeSet<Skill>,
    experience_years_required: f64,
    requires_management: bool,
    education_required: EducationLevel,
    metadata: Metadata,
}

impl RequirementProfile {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn required_skills(&self) -> &BTreeSet<Skill> {
        &self.required_skills
    }

    pub fn experience_years_required(&self) -> f64 {
        self.experience_years_required
    }

    pub fn requires_management(&self) -> bool {
        self.requires_management
    }

    pub fn education_required(&self) -> EducationLevel {
        self.education_required
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Display value for a metadata key, `"Unknown"` when absent or null
    pub fn display_field(&self, key: &str) -> String {
        match self.metadata.get(key) {
            Some(Value::String(value)) => value.clone(),
            Some(Value::Null) | None => "Unknown".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Profile {
    Candidate(CandidateProfile),
    Requirement(RequirementProfile),
}

impl Profile {
    pub fn kind(&self) -> ProfileKind {
        match self {
            Profile::Candidate(_) => ProfileKind::Candidate,
            Profile::Requirement(_) => ProfileKind::Requirement,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Profile::Candidate(candidate) => candidate.id(),
            Profile::Requirement(requirement) => requirement.id(),
        }
    }

    pub fn skills(&self) -> &BTreeSet<Skill> {
        match self {
            Profile::Candidate(candidate) => candidate.skills(),
            Profile::Requirement(requirement) => requirement.required_skills(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            Profile::Candidate(candidate) => candidate.metadata(),
            Profile::Requirement(requirement) => requirement.metadata(),
        }
    }

    pub fn as_candidate(&self) -> Option<&CandidateProfile> {
        match self {
            Profile::Candidate(candidate) => Some(candidate),
            Profile::Requirement(_) => None,
        }
    }

    pub fn as_requirement(&self) -> Option<&RequirementProfile> {
        match self {
            Profile::Requirement(requirement) => Some(requirement),
            Profile::Candidate(_) => None,
        }
    }

    pub fn into_candidate(self) -> Option<CandidateProfile> {
        match self {
            Profile::Candidate(candidate) => Some(candidate),
            Profile::Requirement(_) => None,
        }
    }

    pub fn into_requirement(self) -> Option<RequirementProfile> {
        match self {
            Profile::Requirement(requirement) => Some(requirement),
            Profile::Candidate(_) => None,
        }
    }
}

/// Normalize `text`, run both extractors and wrap the facts in a profile of
/// the requested kind.
pub fn build_profile(
    kind: ProfileKind,
    text: &str,
    id: Option<&str>,
    metadata: Option<Metadata>,
) -> Profile {
    let profile = match kind {
        ProfileKind::Candidate => Profile::Candidate(build_candidate(text, id, metadata)),
        ProfileKind::Requirement => Profile::Requirement(build_requirement(text, id, metadata)),
    };

    debug!(
        "Built {} profile '{}' with {} skills",
        kind,
        profile.id(),
        profile.skills().len()
    );
    profile
}

pub fn build_candidate(text: &str, id: Option<&str>, metadata: Option<Metadata>) -> CandidateProfile {
    let cleaned = normalize(text);
    let attributes = extract_attributes(&cleaned);

    CandidateProfile {
        id: id.unwrap_or(ProfileKind::Candidate.default_id()).to_string(),
        skills: extract_skills(&cleaned),
        experience_years: attributes.years,
        has_management: attributes.has_management,
        education: attributes.education,
        metadata: metadata.unwrap_or_default(),
    }
}

pub fn build_requirement(
    text: &str,
    id: Option<&str>,
    metadata: Option<Metadata>,
) -> RequirementProfile {
    let cleaned = normalize(text);
    let attributes = extract_attributes(&cleaned);

    RequirementProfile {
        id: id.unwrap_or(ProfileKind::Requirement.default_id()).to_string(),
        required_skills: extract_skills(&cleaned),
        experience_years_required: attributes.years,
        requires_management: attributes.has_management,
        education_required: attributes.education,
        metadata: metadata.unwrap_or_default(),
    }
}

/// Assemble a requirement from already known facts, e.g. a curated job listing
pub fn requirement_from_parts(
    id: &str,
    required_skills: BTreeSet<Skill>,
    experience_years_required: f64,
    metadata: Metadata,
) -> RequirementProfile {
    RequirementProfile {
        id: id.to_string(),
        required_skills,
        experience_years_required: experience_years_required.max(0.0),
        requires_management: false,
        education_required: EducationLevel::Unknown,
        metadata,
    }
}

/// Assemble a candidate from already known facts
pub fn candidate_from_parts(
    id: &str,
    skills: BTreeSet<Skill>,
    experience_years: f64,
    metadata: Metadata,
) -> CandidateProfile {
    CandidateProfile {
        id: id.to_string(),
        skills,
        experience_years: experience_years.max(0.0),
        has_management: false,
        education: EducationLevel::Unknown,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_ids() {
        let candidate = build_profile(ProfileKind::Candidate, "python", None, None);
        assert_eq!(candidate.id(), "resume_1");
        assert_eq!(candidate.kind(), ProfileKind::Candidate);

        let requirement = build_profile(ProfileKind::Requirement, "python", None, None);
        assert_eq!(requirement.id(), "job_1");
        assert_eq!(requirement.kind(), ProfileKind::Requirement);
    }

    #[test]
    fn test_candidate_fields() {
        let text = "Team lead, 6 years of experience with Python and Docker. PhD.";
        let profile = build_profile(ProfileKind::Candidate, text, Some("cand-7"), None);
        let candidate = profile.as_candidate().unwrap();

        assert_eq!(candidate.id(), "cand-7");
        assert_eq!(
            candidate.skills(),
            &[Skill::Python, Skill::Docker].into_iter().collect()
        );
        assert_eq!(candidate.experience_years(), 6.0);
        assert!(candidate.has_management());
        assert_eq!(candidate.education(), EducationLevel::Phd);
        assert!(candidate.metadata().is_empty());
    }

    #[test]
    fn test_requirement_fields_and_metadata() {
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!("ML Engineer"));
        metadata.insert("company".to_string(), json!("TechCorp"));
        metadata.insert("salary".to_string(), json!(120000));

        let text = "Looking for ML Engineer with Python and TensorFlow. 3-5 years of experience.";
        let requirement = build_requirement(text, Some("job-9"), Some(metadata.clone()));

        assert_eq!(requirement.id(), "job-9");
        assert_eq!(
            requirement.required_skills(),
            &[Skill::Python, Skill::TensorFlow, Skill::MachineLearning]
                .into_iter()
                .collect()
        );
        assert_eq!(requirement.experience_years_required(), 4.0);
        assert_eq!(requirement.metadata(), &metadata);
        assert_eq!(requirement.display_field("title"), "ML Engineer");
        assert_eq!(requirement.display_field("salary"), "120000");
        assert_eq!(requirement.display_field("location"), "Unknown");
    }

    #[test]
    fn test_builders_agree_with_build_profile() {
        let text = "Director of data, 10 yrs experience, SQL, Spark, masters";
        let via_enum = build_profile(ProfileKind::Candidate, text, None, None);
        let direct = build_candidate(text, None, None);
        assert_eq!(via_enum.into_candidate(), Some(direct));

        let via_enum = build_profile(ProfileKind::Requirement, text, None, None);
        let direct = build_requirement(text, None, None);
        assert_eq!(via_enum.into_requirement(), Some(direct));
    }

    #[test]
    fn test_empty_text_profile() {
        let profile = build_candidate("", None, None);
        assert!(profile.skills().is_empty());
        assert_eq!(profile.experience_years(), 0.0);
        assert!(!profile.has_management());
        assert_eq!(profile.education(), EducationLevel::Unknown);
    }

    #[test]
    fn test_from_parts_clamps_negative_years() {
        let requirement = requirement_from_parts("r", BTreeSet::new(), -3.0, Metadata::new());
        assert_eq!(requirement.experience_years_required(), 0.0);

        let candidate = candidate_from_parts("c", BTreeSet::new(), -1.0, Metadata::new());
        assert_eq!(candidate.experience_years(), 0.0);
    }

    #[test]
    fn test_profile_serializes_with_kind_tag() {
        let profile = build_profile(ProfileKind::Requirement, "docker", None, None);
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["kind"], "requirement");
        assert_eq!(value["required_skills"], json!(["docker"]));
    }
}
