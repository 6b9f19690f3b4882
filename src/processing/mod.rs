//! Extraction and scoring core
//!
//! Everything in here is pure and synchronous: raw text goes in, structured
//! profiles and ranked match results come out.

pub mod text_processor;
pub mod skills;
pub mod attributes;
pub mod profile;
pub mod matcher;
pub mod engine;

pub use attributes::{analyze_text, extract_attributes, EducationLevel, ExperienceAttributes, TextAnalysis};
pub use engine::{KeywordMatchEngine, MatchEngine};
pub use matcher::{rank, score, MatchBand, MatchResult};
pub use profile::{
    build_candidate, build_profile, build_requirement, CandidateProfile, Metadata, Profile,
    ProfileKind, RequirementProfile,
};
pub use skills::{extract_skills, Skill};
pub use text_processor::normalize;
