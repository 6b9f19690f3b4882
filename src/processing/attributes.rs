//! Experience, management and education inference

use aho_corasick::AhoCorasick;
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::processing::skills::{extract_skills, Skill};
use crate::processing::text_processor::{normalize, word_count};

const YEARS_UNIT: &str = r"(?:years?|yrs?)";

/// Substrings that signal people management
pub const MANAGEMENT_KEYWORDS: [&str; 6] =
    ["lead", "manager", "director", "head", "supervisor", "team lead"];

/// Highest degree mentioned in the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    #[default]
    Unknown,
    Bachelors,
    Masters,
    Phd,
}

impl EducationLevel {
    /// Levels in detection priority; the first one with a keyword hit wins
    pub const PRIORITY: [EducationLevel; 3] = [
        EducationLevel::Phd,
        EducationLevel::Masters,
        EducationLevel::Bachelors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::Unknown => "unknown",
            EducationLevel::Bachelors => "bachelors",
            EducationLevel::Masters => "masters",
            EducationLevel::Phd => "phd",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            EducationLevel::Phd => &["phd", "ph.d", "doctorate"],
            EducationLevel::Masters => &["masters", "ms", "m.sc", "m.eng"],
            EducationLevel::Bachelors => &["bachelor", "bs", "b.sc", "b.eng", "ba"],
            EducationLevel::Unknown => &[],
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured facts inferred from free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceAttributes {
    pub years: f64,
    pub has_management: bool,
    pub education: EducationLevel,
}

impl Default for ExperienceAttributes {
    fn default() -> Self {
        Self {
            years: 0.0,
            has_management: false,
            education: EducationLevel::Unknown,
        }
    }
}

/// Full fact sheet for a piece of raw text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub skills: BTreeSet<Skill>,
    pub experience: ExperienceAttributes,
    pub word_count: usize,
    pub char_count: usize,
}

/// How a years figure was recovered from the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YearsRule {
    Range,
    Single,
    Trailing,
}

/// Years rules in priority order. The range rule must run before the single
/// rule, which would otherwise capture only the upper bound.
static YEARS_RULES: Lazy<Vec<(YearsRule, Regex)>> = Lazy::new(|| {
    let rules = [
        (
            YearsRule::Range,
            format!(r"(\d+)\s*-\s*(\d+)\s*{YEARS_UNIT}\s*(?:of)?\s*experience"),
        ),
        (
            YearsRule::Single,
            format!(r"(\d+)\+?\s*{YEARS_UNIT}\s*(?:of)?\s*experience"),
        ),
        (
            YearsRule::Trailing,
            format!(r"experience.*?(\d+)\+?\s*{YEARS_UNIT}"),
        ),
    ];

    rules
        .into_iter()
        .map(|(rule, pattern)| (rule, Regex::new(&pattern).expect("Invalid years regex")))
        .collect()
});

static MANAGEMENT_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(MANAGEMENT_KEYWORDS).expect("Failed to build management matcher")
});

static EDUCATION_MATCHERS: Lazy<Vec<(EducationLevel, AhoCorasick)>> = Lazy::new(|| {
    EducationLevel::PRIORITY
        .iter()
        .map(|level| {
            let matcher =
                AhoCorasick::new(level.keywords()).expect("Failed to build education matcher");
            (*level, matcher)
        })
        .collect()
});

/// Infer years of experience, management signal and education level from
/// normalized text. Never fails: anything unrecognized falls back to defaults.
pub fn extract_attributes(normalized_text: &str) -> ExperienceAttributes {
    let attributes = ExperienceAttributes {
        years: extract_years(normalized_text),
        has_management: has_management(normalized_text),
        education: extract_education(normalized_text),
    };

    debug!(
        "Extracted attributes: years={}, management={}, education={}",
        attributes.years, attributes.has_management, attributes.education
    );
    attributes
}

/// Years of experience, first matching rule wins, 0 when nothing matches
pub fn extract_years(normalized_text: &str) -> f64 {
    for (rule, regex) in YEARS_RULES.iter() {
        if let Some(caps) = regex.captures(normalized_text) {
            let years = match rule {
                YearsRule::Range => match (parse_capture(&caps, 1), parse_capture(&caps, 2)) {
                    (Some(min), Some(max)) => (min + max) / 2.0,
                    _ => 0.0,
                },
                YearsRule::Single | YearsRule::Trailing => parse_capture(&caps, 1).unwrap_or(0.0),
            };
            debug!("Years rule {:?} matched {:?} -> {}", rule, &caps[0], years);
            return years;
        }
    }

    0.0
}

/// `\d` is Unicode aware, so a capture may hold digits that are not ASCII
/// and do not parse
fn parse_capture(caps: &Captures<'_>, group: usize) -> Option<f64> {
    caps.get(group)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|years| years.is_finite())
}

pub fn has_management(normalized_text: &str) -> bool {
    MANAGEMENT_MATCHER.is_match(normalized_text)
}

pub fn extract_education(normalized_text: &str) -> EducationLevel {
    EDUCATION_MATCHERS
        .iter()
        .find(|(_, matcher)| matcher.is_match(normalized_text))
        .map(|(level, _)| *level)
        .unwrap_or_default()
}

/// Normalize raw text and collect every fact the extractors know about
pub fn analyze_text(text: &str) -> TextAnalysis {
    let cleaned = normalize(text);

    TextAnalysis {
        skills: extract_skills(&cleaned),
        experience: extract_attributes(&cleaned),
        word_count: word_count(&cleaned),
        char_count: cleaned.chars().count(),
    }
}
