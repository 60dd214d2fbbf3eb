//! newsbox: renders markdown news snippets into a static site page
//!
//! News documents are fetched in a fixed order, reduced to a title, a
//! publish label and a small markdown body, and spliced into the page's
//! news container as ready-made HTML.

pub mod commands;
pub mod config;
pub mod content;
pub mod fetch;
pub mod i18n;
pub mod page;
pub mod pipeline;
pub mod server;
pub mod state;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A site directory and its configuration
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Page template containing the news container
    pub page_path: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Language override files
    pub languages_dir: PathBuf,
}

impl Site {
    /// Open a site from a directory, falling back to defaults without `_config.yml`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let page_path = base_dir.join(&config.page);
        let public_dir = base_dir.join(&config.public_dir);
        let languages_dir = base_dir.join(&config.languages_dir);

        Ok(Self {
            config,
            base_dir,
            page_path,
            public_dir,
            languages_dir,
        })
    }

    /// Path of the configuration file
    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join("_config.yml")
    }

    /// Local news directory, if news are not fetched over HTTP
    pub fn news_dir(&self) -> Option<PathBuf> {
        if self.config.news.is_remote() {
            None
        } else {
            Some(self.base_dir.join(&self.config.news.source))
        }
    }

    /// Display state from the configured language and theme
    pub fn state(&self) -> state::SiteState {
        state::SiteState::new(self.config.language, self.config.theme)
    }

    /// Translations for a language, including the site's overrides
    pub fn i18n(&self, language: state::Language) -> Result<i18n::I18n> {
        let mut i18n = i18n::I18n::with_builtin(language)?;
        i18n.load_languages(&self.languages_dir)?;
        Ok(i18n)
    }

    /// Fetcher for the configured news source
    pub fn fetcher(&self) -> Result<fetch::Fetcher> {
        Ok(fetch::Fetcher::from_config(&self.base_dir, &self.config.news)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_site_without_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.page_path, dir.path().join("index.html"));
        assert_eq!(site.public_dir, dir.path().join("public"));
        assert_eq!(site.news_dir(), Some(dir.path().join("news")));
        assert_eq!(site.state(), state::SiteState::default());
    }

    #[test]
    fn test_site_with_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "language: en\npublic_dir: dist\nnews:\n  source: https://cdn.example.com/news\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.public_dir, dir.path().join("dist"));
        assert_eq!(site.news_dir(), None);
        assert_eq!(site.state().language(), state::Language::En);
        assert!(matches!(site.fetcher().unwrap(), fetch::Fetcher::Http(_)));
    }
}
