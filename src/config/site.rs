//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// How posts are laid out under the posts directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutPolicy {
    /// Every markdown file directly under the root is one post; the category
    /// comes from front matter.
    Flat,
    /// One subdirectory per category, one level deep; the category comes from
    /// the subdirectory name.
    Nested,
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub posts_dir: String,
    pub out_dir: String,
    pub assets_dir: String,

    // Content
    pub layout: LayoutPolicy,
    pub excerpt_length: usize,
    pub default_category: String,

    /// Display names for category slugs; unmapped categories pass through
    /// with whatever casing appears in the source.
    pub category_titles: HashMap<String, String>,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: String::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            posts_dir: "posts".to_string(),
            out_dir: "public".to_string(),
            assets_dir: "static".to_string(),

            layout: LayoutPolicy::Flat,
            excerpt_length: 180,
            default_category: "uncategorized".to_string(),

            category_titles: default_category_titles(),

            highlight: HighlightConfig::default(),
        }
    }
}

fn default_category_titles() -> HashMap<String, String> {
    [
        ("javascript", "JavaScript"),
        ("typescript", "TypeScript"),
        ("react", "React"),
        ("webpack", "Webpack"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the display title for a category.
    ///
    /// The lookup key is case-insensitive; an unmapped category is returned
    /// unchanged.
    pub fn category_title(&self, category: &str) -> String {
        self.category_titles
            .get(&category.to_lowercase())
            .cloned()
            .unwrap_or_else(|| category.to_string())
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.layout, LayoutPolicy::Flat);
        assert_eq!(config.excerpt_length, 180);
        assert_eq!(config.default_category, "uncategorized");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Frontend Notes
author: Tester
layout: nested
excerpt_length: 150
category_titles:
  vue: Vue.js
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Frontend Notes");
        assert_eq!(config.layout, LayoutPolicy::Nested);
        assert_eq!(config.excerpt_length, 150);
        assert_eq!(config.category_title("vue"), "Vue.js");
    }

    #[test]
    fn test_category_title_lookup() {
        let config = SiteConfig::default();
        assert_eq!(config.category_title("react"), "React");
        assert_eq!(config.category_title("React"), "React");
        assert_eq!(config.category_title("rust"), "rust");
    }
}
