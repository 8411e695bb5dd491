//! Front-matter parsing

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Front-matter data from a post file.
///
/// `title` and `date` are required downstream but optional here, so that a
/// missing field can be reported with the offending file path by the loader
/// instead of as a bare serde error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub excerpt: Option<String>,
    /// Overrides the filename-derived slug when present.
    pub slug: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from a content string.
    /// Returns (front_matter, body).
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        let Some(rest) = content.strip_prefix("---") else {
            // No front-matter block at all. The loader rejects the file
            // later because it carries no title and no date.
            return Ok((FrontMatter::default(), content));
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            return Err(anyhow!("unterminated front-matter block"));
        };

        let yaml = &rest[..end_pos];
        let body = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm: FrontMatter =
            serde_yaml::from_str(yaml).map_err(|e| anyhow!("invalid front matter: {}", e))?;

        Ok((fm, body))
    }

    /// Normalize the date field to a calendar date.
    ///
    /// YAML hands the value over as a string whether the author wrote a bare
    /// date or a quoted one; several common formats are accepted and the
    /// result always formats back as `YYYY-MM-DD`.
    pub fn parse_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // ISO 8601 with an offset, e.g. from editors that write full timestamps
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-03-01
category: react
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.date, Some("2024-03-01".to_string()));
        assert_eq!(fm.category, Some("react".to_string()));
        assert!(body.contains("This is the content."));
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = FrontMatter::parse("Just some text.\n").unwrap();
        assert_eq!(fm.title, None);
        assert!(body.contains("Just some text."));
    }

    #[test]
    fn test_unterminated_block_is_error() {
        let content = "---\ntitle: Broken\n\nNo closing fence here.";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_explicit_slug_and_excerpt() {
        let content = r#"---
title: T
date: 2023-05-30
slug: custom-slug
excerpt: A short summary.
---
Body.
"#;
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.slug, Some("custom-slug".to_string()));
        assert_eq!(fm.excerpt, Some("A short summary.".to_string()));
    }

    #[test]
    fn test_parse_date_formats() {
        for s in ["2024-01-15", "2024/01/15", "2024-01-15 10:30:00"] {
            let fm = FrontMatter {
                date: Some(s.to_string()),
                ..Default::default()
            };
            let d = fm.parse_date().unwrap();
            assert_eq!(d.format("%Y-%m-%d").to_string(), "2024-01-15");
        }
    }

    #[test]
    fn test_unparseable_date() {
        let fm = FrontMatter {
            date: Some("not-a-date".to_string()),
            ..Default::default()
        };
        assert!(fm.parse_date().is_none());
    }
}
