//! Text extraction from various file formats

use crate::error::{MatcherError, Result};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

static HTML_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            MatcherError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Render markdown and strip the resulting markup down to plain lines
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_to_text(&html_output)
}

fn html_to_text(html: &str) -> String {
    let text = html
        .replace("<br>", "\n")
        .replace("</p>", "\n\n")
        .replace("</li>", "\n")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let clean_text = HTML_TAG_REGEX.replace_all(&text, "");
    // Entities for the ampersand are decoded last so "&amp;lt;" stays literal
    let clean_text = clean_text.replace("&amp;", "&");

    let lines: Vec<&str> = clean_text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text_strips_formatting() {
        let text = markdown_to_text("# Jane Roe\n\n**Skills:** Python & *Docker*\n\n- AWS\n- SQL\n");
        assert!(text.contains("Jane Roe"));
        assert!(text.contains("Skills: Python & Docker"));
        assert!(text.contains("AWS"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_markdown_keeps_cpp_and_csharp() {
        let text = markdown_to_text("Languages: C++ and C#");
        assert_eq!(text, "Languages: C++ and C#");
    }
}
