//! Job catalog loading
//!
//! A catalog is a TOML or JSON document with a `jobs` array. Each entry names
//! its description inline or points at a document next to the catalog. Keys
//! other than the ones below travel with the job as opaque metadata.
//!
//! ```toml
//! [[jobs]]
//! title = "Machine Learning Engineer"
//! company = "TechCorp"
//! description = "Python and TensorFlow, 3+ years of experience"
//!
//! [[jobs]]
//! id = "frontend"
//! file = "jobs/frontend.md"
//! ```

use crate::error::{MatcherError, Result};
use crate::input::file_detector::CatalogFormat;
use crate::input::manager::InputManager;
use crate::processing::profile::{build_requirement, Metadata, RequirementProfile};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobCatalog {
    #[serde(default)]
    pub jobs: Vec<JobListing>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Document holding the description, relative to the catalog file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(flatten)]
    pub extra: Metadata,
}

impl JobListing {
    /// Identifier used for the requirement profile; positions are 1-based
    pub fn resolved_id(&self, index: usize) -> String {
        self.id.clone().unwrap_or_else(|| format!("job_{}", index + 1))
    }

    /// Pass-through metadata plus the display keys
    pub fn metadata(&self) -> Metadata {
        let mut metadata = self.extra.clone();
        if let Some(title) = &self.title {
            metadata.insert("title".to_string(), Value::String(title.clone()));
        }
        if let Some(company) = &self.company {
            metadata.insert("company".to_string(), Value::String(company.clone()));
        }
        metadata
    }
}

impl JobCatalog {
    pub fn parse(content: &str, format: CatalogFormat) -> Result<Self> {
        match format {
            CatalogFormat::Toml => toml::from_str(content)
                .map_err(|e| MatcherError::Catalog(format!("Failed to parse TOML catalog: {}", e))),
            CatalogFormat::Json => serde_json::from_str(content)
                .map_err(|e| MatcherError::Catalog(format!("Failed to parse JSON catalog: {}", e))),
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let format = CatalogFormat::from_path(path).ok_or_else(|| {
            MatcherError::UnsupportedFormat(format!(
                "Job catalog must be .toml or .json: {}",
                path.display()
            ))
        })?;

        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "Job catalog does not exist: {}",
                path.display()
            )));
        }

        let content = tokio::fs::read_to_string(path).await?;
        let catalog = Self::parse(&content, format)?;
        info!("Loaded {} jobs from {}", catalog.jobs.len(), path.display());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Resolve every listing's description and build its requirement profile,
    /// preserving catalog order.
    pub async fn into_requirements(
        self,
        base_dir: &Path,
        input: &mut InputManager,
    ) -> Result<Vec<RequirementProfile>> {
        let mut requirements = Vec::with_capacity(self.jobs.len());

        for (index, listing) in self.jobs.iter().enumerate() {
            let id = listing.resolved_id(index);
            let text = match (&listing.description, &listing.file) {
                (Some(description), file) => {
                    if file.is_some() {
                        warn!("Job '{}' has both description and file; using description", id);
                    }
                    description.clone()
                }
                (None, Some(file)) => input.extract_text(&base_dir.join(file)).await?,
                (None, None) => {
                    return Err(MatcherError::Catalog(format!(
                        "Job '{}' has neither a description nor a file",
                        id
                    )));
                }
            };

            requirements.push(build_requirement(&text, Some(&id), Some(listing.metadata())));
        }

        Ok(requirements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::skills::Skill;
    use serde_json::json;

    const TOML_CATALOG: &str = r#"
[[jobs]]
title = "Machine Learning Engineer"
company = "TechCorp"
description = "Looking for ML Engineer with Python and TensorFlow. AWS experience required."
skills = ["python", "tensorflow", "aws", "machine learning"]

[[jobs]]
id = "web"
title = "Frontend Developer"
description = "React developer with JavaScript experience. 2+ years required."
remote = true
"#;

    #[test]
    fn test_parse_toml_catalog() {
        let catalog = JobCatalog::parse(TOML_CATALOG, CatalogFormat::Toml).unwrap();
        assert_eq!(catalog.len(), 2);

        let first = &catalog.jobs[0];
        assert_eq!(first.resolved_id(0), "job_1");
        assert_eq!(first.company.as_deref(), Some("TechCorp"));
        assert_eq!(
            first.extra.get("skills"),
            Some(&json!(["python", "tensorflow", "aws", "machine learning"]))
        );

        let second = &catalog.jobs[1];
        assert_eq!(second.resolved_id(1), "web");
        assert_eq!(second.extra.get("remote"), Some(&json!(true)));
    }

    #[test]
    fn test_parse_json_catalog() {
        let content = r#"{"jobs": [{"title": "Data Engineer", "description": "SQL and Spark", "level": 3}]}"#;
        let catalog = JobCatalog::parse(content, CatalogFormat::Json).unwrap();
        let metadata = catalog.jobs[0].metadata();
        assert_eq!(metadata.get("title"), Some(&json!("Data Engineer")));
        assert_eq!(metadata.get("level"), Some(&json!(3)));
        assert!(!metadata.contains_key("company"));
    }

    #[test]
    fn test_parse_error_is_catalog_error() {
        let result = JobCatalog::parse("[[jobs]\ntitle = ", CatalogFormat::Toml);
        assert!(matches!(result, Err(MatcherError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_into_requirements_inline() {
        let catalog = JobCatalog::parse(TOML_CATALOG, CatalogFormat::Toml).unwrap();
        let mut input = InputManager::new();
        let requirements = catalog
            .into_requirements(Path::new("."), &mut input)
            .await
            .unwrap();

        assert_eq!(requirements.len(), 2);
        assert_eq!(requirements[0].id(), "job_1");
        assert!(requirements[0].required_skills().contains(&Skill::TensorFlow));
        assert_eq!(requirements[0].display_field("title"), "Machine Learning Engineer");
        assert_eq!(requirements[1].id(), "web");
        // "experience. 2+ years" is caught by the trailing rule
        assert_eq!(requirements[1].experience_years_required(), 2.0);
        assert_eq!(requirements[1].display_field("company"), "Unknown");
    }

    #[tokio::test]
    async fn test_into_requirements_missing_text() {
        let catalog = JobCatalog {
            jobs: vec![JobListing {
                title: Some("Ghost".to_string()),
                ..Default::default()
            }],
        };
        let mut input = InputManager::new();
        let result = catalog.into_requirements(Path::new("."), &mut input).await;
        assert!(matches!(result, Err(MatcherError::Catalog(_))));
    }
}
