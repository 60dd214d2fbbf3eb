//! HTML page handling
//!
//! A page is kept as source text. The news container is located by its id
//! attribute and its inner HTML replaced wholesale; locale and theme
//! substitution rewrite attributes and `data-i18n` element text in place.

mod container;

use anyhow::Result;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fs;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

use crate::i18n::I18n;
use crate::state::{Language, Theme};

pub use container::{Container, Element};

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"(?i)<html\b[^>]*>").unwrap();
    static ref LANG_ATTR: Regex = Regex::new(r#"\s+lang\s*=\s*"[^"]*""#).unwrap();
    static ref THEME_ATTR: Regex = Regex::new(r#"\s+data-theme\s*=\s*"[^"]*""#).unwrap();
    static ref I18N_ELEMENT: Regex =
        Regex::new(r#"<[a-zA-Z][\w-]*\b[^>]*\bdata-i18n\s*=\s*"([^"]+)"[^>]*>"#).unwrap();
    static ref LANG_TOGGLE: Regex =
        Regex::new(r#"<[a-zA-Z][\w-]*\b[^>]*\sid\s*=\s*"lang-toggle"[^>]*>"#).unwrap();
}

/// Errors from locating or rewriting elements in a page
#[derive(Error, Debug)]
pub enum PageError {
    #[error("element #{0} not found")]
    NotFound(String),

    #[error("element #{0} has no closing tag")]
    Unclosed(String),

    #[error("invalid element pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// An HTML document held as text
#[derive(Debug, Clone)]
pub struct HtmlPage {
    html: String,
}

impl HtmlPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Read a page from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(fs::read_to_string(path.as_ref())?))
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }

    /// Take a snapshot of the element with the given id
    ///
    /// Returns `Ok(None)` when the page has no such element.
    pub fn container(&self, id: &str) -> Result<Option<Container>, PageError> {
        let Some(inner) = self.inner_range(id)? else {
            return Ok(None);
        };
        Ok(Some(Container::from_markup(id, &self.html[inner])))
    }

    /// Write a container's children back into its element
    pub fn mount(&mut self, container: &Container) -> Result<(), PageError> {
        let inner = self
            .inner_range(container.id())?
            .ok_or_else(|| PageError::NotFound(container.id().to_string()))?;
        self.html.replace_range(inner, &container.to_html());
        Ok(())
    }

    /// Byte range of the inner HTML of the element with the given id
    fn inner_range(&self, id: &str) -> Result<Option<Range<usize>>, PageError> {
        let open = Regex::new(&format!(
            r#"<([a-zA-Z][\w-]*)\b[^>]*\sid\s*=\s*["']{}["'][^>]*>"#,
            regex::escape(id)
        ))?;
        let Some(caps) = open.captures(&self.html) else {
            return Ok(None);
        };
        let (Some(whole), Some(tag)) = (caps.get(0), caps.get(1)) else {
            return Ok(None);
        };
        let start = whole.end();

        // Walk same-named tags to find the matching close
        let tags = Regex::new(&format!(r"(?i)<(/?){}\b[^>]*>", regex::escape(tag.as_str())))?;
        let mut depth = 1usize;
        for m in tags.captures_iter(&self.html[start..]) {
            let is_close = m.get(1).is_some_and(|slash| !slash.as_str().is_empty());
            if is_close {
                depth -= 1;
                if depth == 0 {
                    let end = start + m.get(0).map_or(0, |c| c.start());
                    return Ok(Some(start..end));
                }
            } else {
                depth += 1;
            }
        }

        Err(PageError::Unclosed(id.to_string()))
    }

    /// Translate `data-i18n` elements and set the document language
    pub fn apply_language(&mut self, i18n: &I18n, language: Language) {
        let html = set_html_attribute(&self.html, &LANG_ATTR, "lang", Some(language.html_lang()));
        let html = replace_element_text(&html, &I18N_ELEMENT, |caps| {
            i18n.get_for_lang(language.code(), caps.get(1)?.as_str())
        });
        self.html = replace_element_text(&html, &LANG_TOGGLE, |_| {
            Some(language.toggle_label().to_string())
        });
    }

    /// Mark the document for the light theme, or clear the mark for dark
    pub fn apply_theme(&mut self, theme: Theme) {
        let value = match theme {
            Theme::Light => Some("light"),
            Theme::Dark => None,
        };
        self.html = set_html_attribute(&self.html, &THEME_ATTR, "data-theme", value);
    }
}

/// Set or remove an attribute on the `<html>` tag
fn set_html_attribute(html: &str, existing: &Regex, name: &str, value: Option<&str>) -> String {
    HTML_TAG
        .replace(html, |caps: &Captures| {
            let tag = existing.replace_all(&caps[0], "");
            match value {
                Some(value) => {
                    let body = tag.trim_end_matches('>');
                    format!(r#"{} {}="{}">"#, body, name, value)
                }
                None => tag.into_owned(),
            }
        })
        .into_owned()
}

/// Replace the leading text of every element whose opening tag matches
///
/// The text runs from the end of the opening tag to the next `<`. When
/// `text_for` returns `None` the original text is kept.
fn replace_element_text<F>(html: &str, open_tag: &Regex, text_for: F) -> String
where
    F: Fn(&Captures) -> Option<String>,
{
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;

    for caps in open_tag.captures_iter(html) {
        let Some(tag) = caps.get(0) else {
            continue;
        };
        if tag.start() < cursor {
            continue;
        }
        let text_end = html[tag.end()..]
            .find('<')
            .map_or(html.len(), |offset| tag.end() + offset);

        out.push_str(&html[cursor..tag.end()]);
        match text_for(&caps) {
            Some(text) => out.push_str(&text),
            None => out.push_str(&html[tag.end()..text_end]),
        }
        cursor = text_end;
    }

    out.push_str(&html[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::NewsItem;

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<body>
  <h2 data-i18n="news.title">最新新闻</h2>
  <button id="lang-toggle">EN</button>
  <div class="news-section">
    <div id="news-container" class="news-grid"><div class="loading">...</div></div>
  </div>
  <p data-i18n="missing.key">keep me</p>
</body>
</html>"#;

    fn item(title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            published: String::new(),
            body_html: "<p>body</p>".to_string(),
        }
    }

    #[test]
    fn test_container_snapshot_includes_nested_markup() {
        let page = HtmlPage::new(PAGE);
        let container = page.container("news-container").unwrap().unwrap();
        assert_eq!(container.id(), "news-container");
        assert_eq!(
            container.children(),
            &[Element::Markup(r#"<div class="loading">...</div>"#.to_string())]
        );
    }

    #[test]
    fn test_missing_container() {
        let page = HtmlPage::new(PAGE);
        assert!(page.container("other").unwrap().is_none());
    }

    #[test]
    fn test_container_ignores_data_id_attribute() {
        let page = HtmlPage::new(
            r#"<section data-id="news-container"><p>decoy</p></section><div class="grid" id="news-container"><p>real</p></div>"#,
        );
        let container = page.container("news-container").unwrap().unwrap();
        assert_eq!(
            container.children(),
            &[Element::Markup("<p>real</p>".to_string())]
        );
    }

    #[test]
    fn test_unclosed_container() {
        let page = HtmlPage::new(r#"<div id="news-container"><div></div>"#);
        let err = page.container("news-container").unwrap_err();
        assert!(matches!(err, PageError::Unclosed(_)));
    }

    #[test]
    fn test_mount_replaces_inner_html_only() {
        let mut page = HtmlPage::new(PAGE);
        let mut container = page.container("news-container").unwrap().unwrap();
        container.clear();
        container.append(Element::news_box(1, item("A"), "发布时间："));
        page.mount(&container).unwrap();

        let html = page.as_str();
        assert!(!html.contains("loading"));
        assert!(html.contains(r#"<div id="news-container" class="news-grid"><div class="news-box" id="news-item-1">"#));
        assert!(html.contains("<h3>A</h3>"));
        assert!(html.contains("</div>\n  </div>\n  <p data-i18n"));
    }

    #[test]
    fn test_apply_language() {
        let mut page = HtmlPage::new(PAGE);
        let i18n = I18n::with_builtin(Language::En).unwrap();
        page.apply_language(&i18n, Language::En);

        let html = page.as_str();
        assert!(html.contains(r#"<html lang="en">"#));
        assert!(html.contains(r#"<h2 data-i18n="news.title">Latest News</h2>"#));
        assert!(html.contains(r#"<button id="lang-toggle">CN</button>"#));
        assert!(html.contains(r#"<p data-i18n="missing.key">keep me</p>"#));
    }

    #[test]
    fn test_apply_language_adds_missing_lang_attribute() {
        let mut page = HtmlPage::new("<html><body></body></html>");
        let i18n = I18n::with_builtin(Language::Zh).unwrap();
        page.apply_language(&i18n, Language::Zh);
        assert_eq!(page.as_str(), r#"<html lang="zh-CN"><body></body></html>"#);
    }

    #[test]
    fn test_apply_theme() {
        let mut page = HtmlPage::new(r#"<html lang="en"><body></body></html>"#);
        page.apply_theme(Theme::Light);
        assert_eq!(
            page.as_str(),
            r#"<html lang="en" data-theme="light"><body></body></html>"#
        );

        page.apply_theme(Theme::Light);
        assert_eq!(page.as_str().matches("data-theme").count(), 1);

        page.apply_theme(Theme::Dark);
        assert_eq!(page.as_str(), r#"<html lang="en"><body></body></html>"#);
    }
}
