//! Input manager for handling different file types

use crate::error::{MatcherError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match self.detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(MatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        if path.extension().is_none() {
            return Err(MatcherError::InvalidInput(format!(
                "File has no extension: {}",
                path.display()
            )));
        }

        Ok(FileType::from_path(path))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
