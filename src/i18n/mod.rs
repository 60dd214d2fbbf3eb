//! Internationalization (i18n) support
//!
//! The zh and en dictionaries are embedded in the binary. Files in the
//! site's languages directory (`zh.yml`, `en.json`, ...) add or override
//! entries key by key.

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::state::Language;

const BUILTIN_ZH: &str = include_str!("zh.yml");
const BUILTIN_EN: &str = include_str!("en.yml");

/// Locale used when a key is missing from the active one
const FALLBACK_LANG: &str = "zh";

/// Internationalization handler
pub struct I18n {
    /// Current language
    language: String,
    /// Flattened language data: lang -> "dotted.key" -> translation
    translations: HashMap<String, HashMap<String, String>>,
}

impl I18n {
    /// Create an empty i18n handler
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            translations: HashMap::new(),
        }
    }

    /// Create a handler with the embedded zh and en dictionaries
    pub fn with_builtin(language: Language) -> Result<Self> {
        let mut i18n = Self::new(language.code());
        i18n.merge_yaml("zh", BUILTIN_ZH)?;
        i18n.merge_yaml("en", BUILTIN_EN)?;
        Ok(i18n)
    }

    /// Load language files from a directory, overriding existing keys
    pub fn load_languages<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let lang = lang.to_string();

            let content = fs::read_to_string(&path)?;
            let loaded = match ext {
                Some("yml") | Some("yaml") => self.merge_yaml(&lang, &content),
                Some("json") => self.merge_json(&lang, &content),
                _ => continue,
            };

            // Skip invalid files
            match loaded {
                Ok(()) => tracing::debug!("Loaded language file: {:?}", path),
                Err(e) => tracing::warn!("Failed to parse language file {:?}: {}", path, e),
            }
        }

        Ok(())
    }

    fn merge_yaml(&mut self, lang: &str, content: &str) -> Result<()> {
        let data: serde_yaml::Value = serde_yaml::from_str(content)?;
        let entry = self.translations.entry(lang.to_string()).or_default();
        flatten_yaml(&data, "", entry);
        Ok(())
    }

    fn merge_json(&mut self, lang: &str, content: &str) -> Result<()> {
        let data: serde_json::Value = serde_json::from_str(content)?;
        let entry = self.translations.entry(lang.to_string()).or_default();
        flatten_json(&data, "", entry);
        Ok(())
    }

    /// Get the current language
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Set the current language
    pub fn set_language(&mut self, lang: Language) {
        self.language = lang.code().to_string();
    }

    /// Get a translation by dotted key, e.g. "news.title"
    pub fn get(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_else(|| key.to_string())
    }

    /// Get a translation from the active locale or the fallback locale
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.get_for_lang(&self.language, key).or_else(|| {
            if self.language != FALLBACK_LANG {
                self.get_for_lang(FALLBACK_LANG, key)
            } else {
                None
            }
        })
    }

    /// Get a translation for a specific language only
    pub fn get_for_lang(&self, lang: &str, key: &str) -> Option<String> {
        self.translations
            .get(lang)
            .and_then(|data| data.get(key))
            .cloned()
    }

    /// Check if the active locale has its own translation for a key
    pub fn has(&self, key: &str) -> bool {
        self.get_for_lang(&self.language, key).is_some()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(FALLBACK_LANG)
    }
}

/// Flatten a YAML mapping into dot-notation keys
fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, result: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    _ => continue,
                };
                flatten_yaml(v, &join_key(prefix, &key), result);
            }
        }
        serde_yaml::Value::String(s) => {
            result.insert(prefix.to_string(), s.clone());
        }
        serde_yaml::Value::Number(n) => {
            result.insert(prefix.to_string(), n.to_string());
        }
        serde_yaml::Value::Bool(b) => {
            result.insert(prefix.to_string(), b.to_string());
        }
        _ => {}
    }
}

/// Flatten a JSON object into dot-notation keys
fn flatten_json(value: &serde_json::Value, prefix: &str, result: &mut HashMap<String, String>) {
    match value {
        serde_json::Value::Object(obj) => {
            for (k, v) in obj {
                flatten_json(v, &join_key(prefix, k), result);
            }
        }
        serde_json::Value::String(s) => {
            result.insert(prefix.to_string(), s.clone());
        }
        serde_json::Value::Number(n) => {
            result.insert(prefix.to_string(), n.to_string());
        }
        serde_json::Value::Bool(b) => {
            result.insert(prefix.to_string(), b.to_string());
        }
        _ => {}
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_translations() {
        let i18n = I18n::with_builtin(Language::En).unwrap();
        assert_eq!(i18n.get("news.title"), "Latest News");
        assert_eq!(i18n.get("news.untitled"), "Untitled");
        assert_eq!(i18n.get("projects.ts.feat1"), "Unique Gameplay");

        let i18n = I18n::with_builtin(Language::Zh).unwrap();
        assert_eq!(i18n.get("news.untitled"), "无标题");
        assert_eq!(i18n.get("news.published_label"), "发布时间：");
        assert_eq!(i18n.get("news.load_failed"), "无法加载新闻内容。");
    }

    #[test]
    fn test_missing_key_falls_back() {
        let mut i18n = I18n::new("en");
        i18n.merge_yaml("zh", "only_zh: 仅中文\n").unwrap();
        assert_eq!(i18n.get("only_zh"), "仅中文");
        assert!(!i18n.has("only_zh"));
        assert_eq!(i18n.get("unknown.key"), "unknown.key");
        assert_eq!(i18n.lookup("unknown.key"), None);
    }

    #[test]
    fn test_load_languages_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("en.yml"),
            "news:\n  title: What's New\nextra: Extra\n",
        )
        .unwrap();
        fs::write(dir.path().join("zh.json"), r#"{"news": {"title": "动态"}}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut i18n = I18n::with_builtin(Language::En).unwrap();
        i18n.load_languages(dir.path()).unwrap();

        assert_eq!(i18n.get("news.title"), "What's New");
        assert_eq!(i18n.get("extra"), "Extra");
        // Untouched keys survive the merge
        assert_eq!(i18n.get("news.untitled"), "Untitled");

        i18n.set_language(Language::Zh);
        assert_eq!(i18n.get("news.title"), "动态");
    }

    #[test]
    fn test_invalid_language_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("en.json"), "{ not json").unwrap();

        let mut i18n = I18n::with_builtin(Language::En).unwrap();
        i18n.load_languages(dir.path()).unwrap();
        assert_eq!(i18n.get("news.title"), "Latest News");
    }
}
