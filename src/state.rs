//! Display state shared by everything that renders a page

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Site locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
}

impl Language {
    /// Key used for translation lookups
    pub fn code(self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    /// Value for the `<html lang>` attribute
    pub fn html_lang(self) -> &'static str {
        match self {
            Language::Zh => "zh-CN",
            Language::En => "en",
        }
    }

    /// Label of the button that switches to the other locale
    pub fn toggle_label(self) -> &'static str {
        match self {
            Language::Zh => "EN",
            Language::En => "CN",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Language::Zh => Language::En,
            Language::En => Language::Zh,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" => Ok(Language::Zh),
            "en" => Ok(Language::En),
            other => Err(format!("unknown language: {} (expected zh or en)", other)),
        }
    }
}

/// Color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn other(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => f.write_str("dark"),
            Theme::Light => f.write_str("light"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme: {} (expected dark or light)", other)),
        }
    }
}

/// Current language and theme of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteState {
    language: Language,
    theme: Theme,
}

impl SiteState {
    pub fn new(language: Language, theme: Theme) -> Self {
        Self { language, theme }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Switch to the other locale and return it
    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.other();
        self.language
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Switch to the other theme and return it
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.other();
        self.theme
    }
}

impl Default for SiteState {
    fn default() -> Self {
        Self::new(Language::Zh, Theme::Dark)
    }
}
