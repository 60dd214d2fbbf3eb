//! News documents and the title/date extraction parser

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::markdown;

/// Name of a news document to fetch, e.g. `news1.md`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentResource(String);

impl ContentResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentResource {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Fetched, unparsed text of one resource
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub resource: ContentResource,
    pub text: String,
}

impl RawDocument {
    pub fn new(resource: ContentResource, text: impl Into<String>) -> Self {
        Self {
            resource,
            text: text.into(),
        }
    }
}

/// A parsed news entry ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    /// Title from the first `# ` line, or the untitled placeholder
    pub title: String,

    /// Publish label from the first date line, empty when absent
    pub published: String,

    /// Body converted to HTML, without the title and date lines
    pub body_html: String,
}

impl NewsItem {
    pub fn has_date(&self) -> bool {
        !self.published.is_empty()
    }
}

/// Line prefixes that mark the title and the publish date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSet {
    pub title_prefix: String,
    pub date_label: String,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self {
            title_prefix: "# ".to_string(),
            date_label: "发布时间：".to_string(),
        }
    }
}

/// Extracts title and date lines from a document and renders the rest
///
/// Each pattern matches the first line that starts with its prefix. Only
/// that one line is removed from the body.
#[derive(Debug, Clone)]
pub struct NewsParser {
    title: Regex,
    date: Regex,
    untitled: String,
}

impl NewsParser {
    /// Build a parser from a pattern set and the placeholder used for
    /// documents without a title line
    pub fn new(patterns: &PatternSet, untitled: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            title: line_pattern(&patterns.title_prefix)?,
            date: line_pattern(&patterns.date_label)?,
            untitled: untitled.into(),
        })
    }

    pub fn untitled(&self) -> &str {
        &self.untitled
    }

    /// Parse a fetched document. Never fails: missing parts get defaults.
    pub fn parse(&self, doc: RawDocument) -> NewsItem {
        // The converter works on `\n` line endings only
        let mut body = doc.text.replace("\r\n", "\n");

        let title = match take_first_line(&self.title, &mut body) {
            Some(title) => title,
            None => {
                tracing::debug!("No title line in {}, using placeholder", doc.resource);
                self.untitled.clone()
            }
        };
        let published = take_first_line(&self.date, &mut body).unwrap_or_default();

        NewsItem {
            title,
            published,
            body_html: markdown::convert(body.trim()),
        }
    }
}

/// Line-anchored pattern capturing the rest of the line after `prefix`
fn line_pattern(prefix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?m)^{}(.+?)\r?$", regex::escape(prefix)))
}

/// Remove the first line matching `pattern` from `text` and return its capture
fn take_first_line(pattern: &Regex, text: &mut String) -> Option<String> {
    let (range, value) = {
        let caps = pattern.captures(text)?;
        let whole = caps.get(0)?;
        (whole.range(), caps.get(1)?.as_str().to_string())
    };
    text.replace_range(range, "");
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> NewsParser {
        NewsParser::new(&PatternSet::default(), "无标题").unwrap()
    }

    fn doc(text: &str) -> RawDocument {
        RawDocument::new(ContentResource::new("news1.md"), text)
    }

    #[test]
    fn test_parse_title_date_and_body() {
        let item = parser().parse(doc("# Hello\n发布时间：2024-01-01\nBody text."));
        assert_eq!(item.title, "Hello");
        assert_eq!(item.published, "2024-01-01");
        assert_eq!(item.body_html, "<p>Body text.</p>");
        assert!(!item.body_html.contains("Hello"));
        assert!(!item.body_html.contains("2024-01-01"));
    }

    #[test]
    fn test_missing_title_uses_placeholder() {
        let item = parser().parse(doc("发布时间：2024-02-02\n\nJust a body."));
        assert_eq!(item.title, "无标题");
        assert_eq!(item.published, "2024-02-02");
        assert_eq!(item.body_html, "<p>Just a body.</p>");
    }

    #[test]
    fn test_missing_date_is_empty() {
        let item = parser().parse(doc("# Only a title\n\nSome text"));
        assert_eq!(item.title, "Only a title");
        assert_eq!(item.published, "");
        assert!(!item.has_date());
        assert_eq!(item.body_html, "<p>Some text</p>");
    }

    #[test]
    fn test_only_first_title_line_is_extracted() {
        let item = parser().parse(doc("# First\n\nIntro\n\n# Second"));
        assert_eq!(item.title, "First");
        assert_eq!(item.body_html, "<p>Intro</p><p><h1>Second</h1></p>");
    }

    #[test]
    fn test_title_after_body_lines() {
        let item = parser().parse(doc("Lead line\n# Late Title\nTail"));
        assert_eq!(item.title, "Late Title");
        // The removed line leaves a blank line behind, which splits paragraphs
        assert_eq!(item.body_html, "<p>Lead line</p><p>Tail</p>");
    }

    #[test]
    fn test_date_label_must_start_the_line() {
        let item = parser().parse(doc("# T\n见 发布时间：2024-03-03"));
        assert_eq!(item.published, "");
        assert!(item.body_html.contains("发布时间：2024-03-03"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let item = parser().parse(doc("# Windows\r\n发布时间：2024-04-04\r\nBody"));
        assert_eq!(item.title, "Windows");
        assert_eq!(item.published, "2024-04-04");
        assert_eq!(item.body_html, "<p>Body</p>");
    }

    #[test]
    fn test_crlf_body_headings_and_paragraphs() {
        let item = parser().parse(doc("# T\r\n\r\n## Sub\r\n\r\nPara"));
        assert_eq!(item.title, "T");
        assert_eq!(item.body_html, "<p><h2>Sub</h2></p><p>Para</p>");
    }

    #[test]
    fn test_empty_document() {
        let item = parser().parse(doc(""));
        assert_eq!(item.title, "无标题");
        assert_eq!(item.published, "");
        assert_eq!(item.body_html, "");
    }

    #[test]
    fn test_custom_patterns() {
        let patterns = PatternSet {
            title_prefix: "Title: ".to_string(),
            date_label: "Published: ".to_string(),
        };
        let parser = NewsParser::new(&patterns, "Untitled").unwrap();
        let item = parser.parse(doc("Title: Custom\nPublished: May 5\n**Bold** body"));
        assert_eq!(item.title, "Custom");
        assert_eq!(item.published, "May 5");
        assert_eq!(item.body_html, "<p><strong>Bold</strong> body</p>");
    }
}
