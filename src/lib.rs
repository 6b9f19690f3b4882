//! Job matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{Result, MatcherError};
pub use config::Config;
pub use processing::{
    analyze_text, build_candidate, build_profile, build_requirement, extract_attributes,
    extract_skills, normalize, rank, score, CandidateProfile, EducationLevel,
    ExperienceAttributes, KeywordMatchEngine, MatchBand, MatchEngine, MatchResult, Metadata,
    Profile, ProfileKind, RequirementProfile, Skill, TextAnalysis,
};
