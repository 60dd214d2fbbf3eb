//! Markdown subset rendering
//!
//! Only headings (levels 1-3), bold, italic and blank-line paragraphs are
//! understood. Everything else, including raw HTML, passes through untouched.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref H1: Regex = Regex::new(r"(?mi)^# (.*)$").unwrap();
    static ref H2: Regex = Regex::new(r"(?mi)^## (.*)$").unwrap();
    static ref H3: Regex = Regex::new(r"(?mi)^### (.*)$").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*(.*?)\*").unwrap();
}

/// Convert markdown-subset text into an HTML fragment
///
/// The rules run in a fixed order: headings, bold, italic, paragraph breaks,
/// then a single `<p>` wrapper around the whole result. An empty wrapper
/// collapses to the empty string.
pub fn convert(text: &str) -> String {
    let html = H1.replace_all(text, "<h1>${1}</h1>");
    let html = H2.replace_all(&html, "<h2>${1}</h2>");
    let html = H3.replace_all(&html, "<h3>${1}</h3>");

    // Bold must run before italic so `**` is consumed as a pair
    let html = BOLD.replace_all(&html, "<strong>${1}</strong>");
    let html = ITALIC.replace_all(&html, "<em>${1}</em>");

    let html = html.replace("\n\n", "</p><p>");
    if html.trim().is_empty() {
        return String::new();
    }

    format!("<p>{}</p>", html)
}
