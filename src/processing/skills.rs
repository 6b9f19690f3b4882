//! Skill vocabulary and keyword recognition

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Closed vocabulary of recognized skills.
///
/// Serialized as the display identifier (`"machine learning"`, `"scikit-learn"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "tensorflow")]
    TensorFlow,
    #[serde(rename = "pytorch")]
    PyTorch,
    #[serde(rename = "keras")]
    Keras,
    #[serde(rename = "machine learning")]
    MachineLearning,
    #[serde(rename = "deep learning")]
    DeepLearning,
    #[serde(rename = "nlp")]
    Nlp,
    #[serde(rename = "computer vision")]
    ComputerVision,
    #[serde(rename = "aws")]
    Aws,
    #[serde(rename = "docker")]
    Docker,
    #[serde(rename = "kubernetes")]
    Kubernetes,
    #[serde(rename = "sql")]
    Sql,
    #[serde(rename = "git")]
    Git,
    #[serde(rename = "linux")]
    Linux,
    #[serde(rename = "pandas")]
    Pandas,
    #[serde(rename = "numpy")]
    NumPy,
    #[serde(rename = "scikit-learn")]
    ScikitLearn,
    #[serde(rename = "matplotlib")]
    Matplotlib,
    #[serde(rename = "seaborn")]
    Seaborn,
    #[serde(rename = "fastapi")]
    FastApi,
    #[serde(rename = "streamlit")]
    Streamlit,
    #[serde(rename = "spark")]
    Spark,
    #[serde(rename = "javascript")]
    JavaScript,
    #[serde(rename = "react")]
    React,
}

impl Skill {
    pub const ALL: [Skill; 24] = [
        Skill::Python,
        Skill::TensorFlow,
        Skill::PyTorch,
        Skill::Keras,
        Skill::MachineLearning,
        Skill::DeepLearning,
        Skill::Nlp,
        Skill::ComputerVision,
        Skill::Aws,
        Skill::Docker,
        Skill::Kubernetes,
        Skill::Sql,
        Skill::Git,
        Skill::Linux,
        Skill::Pandas,
        Skill::NumPy,
        Skill::ScikitLearn,
        Skill::Matplotlib,
        Skill::Seaborn,
        Skill::FastApi,
        Skill::Streamlit,
        Skill::Spark,
        Skill::JavaScript,
        Skill::React,
    ];

    /// Canonical identifier, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Python => "python",
            Skill::TensorFlow => "tensorflow",
            Skill::PyTorch => "pytorch",
            Skill::Keras => "keras",
            Skill::MachineLearning => "machine learning",
            Skill::DeepLearning => "deep learning",
            Skill::Nlp => "nlp",
            Skill::ComputerVision => "computer vision",
            Skill::Aws => "aws",
            Skill::Docker => "docker",
            Skill::Kubernetes => "kubernetes",
            Skill::Sql => "sql",
            Skill::Git => "git",
            Skill::Linux => "linux",
            Skill::Pandas => "pandas",
            Skill::NumPy => "numpy",
            Skill::ScikitLearn => "scikit-learn",
            Skill::Matplotlib => "matplotlib",
            Skill::Seaborn => "seaborn",
            Skill::FastApi => "fastapi",
            Skill::Streamlit => "streamlit",
            Skill::Spark => "spark",
            Skill::JavaScript => "javascript",
            Skill::React => "react",
        }
    }

    /// Phrases that identify the skill; the identifier itself always comes first
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Skill::Python => &["python"],
            Skill::TensorFlow => &["tensorflow", "tf"],
            Skill::PyTorch => &["pytorch", "torch"],
            Skill::Keras => &["keras"],
            Skill::MachineLearning => &["machine learning", "ml"],
            Skill::DeepLearning => &["deep learning"],
            Skill::Nlp => &["nlp", "natural language processing"],
            Skill::ComputerVision => &["computer vision", "cv", "opencv"],
            Skill::Aws => &["aws", "amazon web services"],
            Skill::Docker => &["docker"],
            Skill::Kubernetes => &["kubernetes", "k8s"],
            Skill::Sql => &["sql"],
            Skill::Git => &["git", "github", "gitlab"],
            Skill::Linux => &["linux"],
            Skill::Pandas => &["pandas"],
            Skill::NumPy => &["numpy"],
            Skill::ScikitLearn => &["scikit-learn", "sklearn"],
            Skill::Matplotlib => &["matplotlib"],
            Skill::Seaborn => &["seaborn"],
            Skill::FastApi => &["fastapi"],
            Skill::Streamlit => &["streamlit"],
            Skill::Spark => &["spark", "pyspark"],
            Skill::JavaScript => &["javascript", "js"],
            Skill::React => &["react", "react.js", "reactjs"],
        }
    }

    /// Look up a skill by its canonical identifier
    pub fn from_identifier(identifier: &str) -> Option<Skill> {
        let needle = identifier.trim().to_lowercase();
        Skill::ALL.into_iter().find(|skill| skill.as_str() == needle)
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One word-bounded alternation per skill, compiled once for the process.
static SKILL_PATTERNS: Lazy<Vec<(Skill, Regex)>> = Lazy::new(|| {
    Skill::ALL
        .iter()
        .map(|skill| {
            let alternatives: Vec<String> = skill
                .keywords()
                .iter()
                .map(|keyword| regex::escape(keyword))
                .collect();
            let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
            let regex = Regex::new(&pattern).expect("Invalid skill pattern");
            (*skill, regex)
        })
        .collect()
});

/// Recognize skills in normalized text.
///
/// A skill is present when any of its patterns matches; an empty set means
/// nothing from the vocabulary was found.
pub fn extract_skills(normalized_text: &str) -> BTreeSet<Skill> {
    let skills: BTreeSet<Skill> = SKILL_PATTERNS
        .iter()
        .filter(|(_, regex)| regex.is_match(normalized_text))
        .map(|(skill, _)| *skill)
        .collect();

    trace!("Recognized {} skills", skills.len());
    skills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::text_processor::normalize;

    fn skills_of(text: &str) -> BTreeSet<Skill> {
        extract_skills(&normalize(text))
    }

    #[test]
    fn test_literal_and_abbreviation_patterns() {
        let found = skills_of("Built models with TF and torch; deployed on k8s.");
        assert!(found.contains(&Skill::TensorFlow));
        assert!(found.contains(&Skill::PyTorch));
        assert!(found.contains(&Skill::Kubernetes));

        let found = skills_of("Amazon Web Services, OpenCV, sklearn, PySpark");
        assert!(found.contains(&Skill::Aws));
        assert!(found.contains(&Skill::ComputerVision));
        assert!(found.contains(&Skill::ScikitLearn));
        assert!(found.contains(&Skill::Spark));
    }

    #[test]
    fn test_phrases() {
        let found = skills_of("Machine Learning and Deep Learning for Natural Language Processing");
        assert_eq!(
            found,
            [Skill::MachineLearning, Skill::DeepLearning, Skill::Nlp]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn test_word_boundaries() {
        // "ml" inside "html", "git" inside "digital", "sql" inside "mysqld"
        let found = skills_of("HTML pages for a digital agency running mysqld");
        assert!(found.is_empty(), "unexpected skills: {:?}", found);
    }

    #[test]
    fn test_git_family() {
        assert!(skills_of("Contributions on GitHub").contains(&Skill::Git));
        assert!(skills_of("GitLab CI pipelines").contains(&Skill::Git));
    }

    #[test]
    fn test_no_duplicates_for_repeated_mentions() {
        let found = skills_of("python python PYTHON; ml, machine learning, ML");
        let as_vec: Vec<Skill> = found.iter().copied().collect();
        assert_eq!(as_vec, vec![Skill::Python, Skill::MachineLearning]);
    }

    #[test]
    fn test_empty_text_has_no_skills() {
        assert!(extract_skills("").is_empty());
        assert!(skills_of("Barista with latte art certification").is_empty());
    }

    #[test]
    fn test_identifier_round_trip() {
        for skill in Skill::ALL {
            assert_eq!(Skill::from_identifier(skill.as_str()), Some(skill));
            assert_eq!(skill.keywords()[0], skill.as_str());
        }
        assert_eq!(Skill::from_identifier("Machine Learning"), Some(Skill::MachineLearning));
        assert_eq!(Skill::from_identifier("cobol"), None);
    }

    #[test]
    fn test_serializes_as_identifier() {
        let json = serde_json::to_string(&Skill::ScikitLearn).unwrap();
        assert_eq!(json, r#""scikit-learn""#);
        let skill: Skill = serde_json::from_str(r#""machine learning""#).unwrap();
        assert_eq!(skill, Skill::MachineLearning);
    }
}
