//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }
}

/// Serialization formats a job catalog may be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "toml" => Some(CatalogFormat::Toml),
            "json" => Some(CatalogFormat::Json),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_extensions() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("txt"), FileType::Text);
        assert_eq!(FileType::from_extension("markdown"), FileType::Markdown);
        assert_eq!(FileType::from_extension("docx"), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("resume")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("cv/resume.md")), FileType::Markdown);
    }

    #[test]
    fn test_catalog_extensions() {
        assert_eq!(CatalogFormat::from_path(Path::new("jobs.toml")), Some(CatalogFormat::Toml));
        assert_eq!(CatalogFormat::from_path(Path::new("jobs.JSON")), Some(CatalogFormat::Json));
        assert_eq!(CatalogFormat::from_path(Path::new("jobs.csv")), None);
    }
}
