//! Post and category models

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::path::PathBuf;

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// URL-safe identifier, unique within a category
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Classification label as it appears in the source
    pub category: String,

    /// Explicit front-matter excerpt, or a truncation of the raw body
    pub excerpt: String,

    /// Raw markdown body
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Source file path
    pub source: PathBuf,
}

impl Post {
    /// Date formatted as `YYYY-MM-DD`
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Four-digit publication year
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// URL-safe category key, used for grouping and routing
    pub fn category_slug(&self) -> String {
        slug::slugify(&self.category)
    }

    /// Route path for the detail page
    pub fn url(&self) -> String {
        format!("/posts/{}/{}", self.category_slug(), self.slug)
    }
}

/// A category with its post count
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub slug: String,
    /// Display name resolved through the configured title map
    pub title: String,
    pub count: usize,
}

impl Category {
    /// Route path for the category page
    pub fn url(&self) -> String {
        format!("/categories/{}", self.slug)
    }
}
