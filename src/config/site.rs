//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::{ContentResource, PatternSet};
use crate::state::{Language, Theme};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: Language,
    pub theme: Theme,

    // Directory
    pub page: String,
    pub public_dir: String,
    pub languages_dir: String,
    /// Files and directories copied verbatim into the public directory
    pub assets: Vec<String>,

    // News
    #[serde(default)]
    pub news: NewsConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Trystage".to_string(),
            language: Language::Zh,
            theme: Theme::Dark,

            page: "index.html".to_string(),
            public_dir: "public".to_string(),
            languages_dir: "languages".to_string(),
            assets: ["css", "js", "images", "news", "favicon.ico"]
                .into_iter()
                .map(String::from)
                .collect(),

            news: NewsConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// News pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Directory relative to the site root, or an http(s) base URL
    pub source: String,
    /// Documents to render, in display order
    pub files: Vec<ContentResource>,
    pub container_id: String,
    pub title_prefix: String,
    pub date_label: String,
    pub timeout_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        let patterns = PatternSet::default();
        Self {
            source: "news".to_string(),
            files: ["news1.md", "news2.md", "news3.md"]
                .into_iter()
                .map(ContentResource::from)
                .collect(),
            container_id: "news-container".to_string(),
            title_prefix: patterns.title_prefix,
            date_label: patterns.date_label,
            timeout_secs: 30,
        }
    }
}

impl NewsConfig {
    pub fn patterns(&self) -> PatternSet {
        PatternSet {
            title_prefix: self.title_prefix.clone(),
            date_label: self.date_label.clone(),
        }
    }

    /// Whether the source points at a remote server
    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.language, Language::Zh);
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.news.container_id, "news-container");
        assert_eq!(
            config.news.files,
            vec![
                ContentResource::new("news1.md"),
                ContentResource::new("news2.md"),
                ContentResource::new("news3.md"),
            ]
        );
        assert!(!config.news.is_remote());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Site
language: en
theme: light
news:
  source: https://example.com/news
  files: [a.md, b.md]
  timeout_secs: 5
footer_note: hello
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Site");
        assert_eq!(config.language, Language::En);
        assert_eq!(config.theme, Theme::Light);
        assert!(config.news.is_remote());
        assert_eq!(config.news.files.len(), 2);
        assert_eq!(config.news.files[1].name(), "b.md");
        assert_eq!(config.news.timeout_secs, 5);
        // Unset keys keep their defaults
        assert_eq!(config.news.date_label, "发布时间：");
        assert_eq!(config.page, "index.html");
        assert!(config.extra.contains_key("footer_note"));
        assert!(config.assets.contains(&"css".to_string()));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "news:\n  container_id: latest\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.news.container_id, "latest");
        assert_eq!(config.news.patterns(), PatternSet::default());
    }
}
