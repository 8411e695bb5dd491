//! Built-in page templates using the Tera template engine
//!
//! All templates are embedded directly in the binary. The same templates
//! back the server-rendered pages and the static export.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{Category, Post};

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Post content is pre-rendered HTML; autoescaping would mangle it.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("archive.html", include_str!("theme/archive.html")),
            ("post.html", include_str!("theme/post.html")),
            ("categories.html", include_str!("theme/categories.html")),
            ("category.html", include_str!("theme/category.html")),
            ("not_found.html", include_str!("theme/not_found.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: reformat a `YYYY-MM-DD` date string for display
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "LL".to_string(),
    };

    if format == "LL" {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            return Ok(tera::Value::String(date.format("%B %d, %Y").to_string()));
        }
    }

    // Already YYYY-MM-DD
    Ok(tera::Value::String(s))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteView {
    pub title: String,
    pub description: String,
    pub author: String,
    pub root: String,
}

impl SiteView {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            root: config.root.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub category: String,
    pub category_title: String,
    pub url: String,
    pub excerpt: String,
    pub content: String,
}

impl PostView {
    pub fn from_post(post: &Post, config: &SiteConfig) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post.date_str(),
            category: post.category_slug(),
            category_title: config.category_title(&post.category),
            url: post.url(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub slug: String,
    pub title: String,
    pub count: usize,
    pub url: String,
}

impl CategoryView {
    pub fn from_category(category: &Category) -> Self {
        Self {
            slug: category.slug.clone(),
            title: category.title.clone(),
            count: category.count,
            url: category.url(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct YearView {
    pub year: i32,
    pub posts: Vec<PostView>,
}
