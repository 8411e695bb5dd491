//! Post index - sorted, grouped, and filtered views over parsed posts

use std::collections::HashMap;

use crate::config::SiteConfig;
use crate::content::{Category, Post};

/// An ordered collection of posts, descending by date.
///
/// Built from scratch on every request or build pass; all groupings and
/// counts are derived from the post list and never stored independently.
pub struct PostIndex {
    posts: Vec<Post>,
}

impl PostIndex {
    /// Wrap an already-loaded post list, enforcing the date-descending order.
    pub fn new(mut posts: Vec<Post>) -> Self {
        // Stable sort: posts sharing a date keep their enumeration order.
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Self { posts }
    }

    /// All posts, date descending
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts in one category, matched case-insensitively
    pub fn by_category(&self, category: &str) -> Vec<&Post> {
        let wanted = category.to_lowercase();
        self.posts
            .iter()
            .filter(|p| p.category.to_lowercase() == wanted || p.category_slug() == wanted)
            .collect()
    }

    /// Look up one post by its route key
    pub fn get(&self, category: &str, slug: &str) -> Option<&Post> {
        let wanted = category.to_lowercase();
        self.posts
            .iter()
            .find(|p| p.slug == slug && (p.category.to_lowercase() == wanted || p.category_slug() == wanted))
    }

    /// Posts grouped by calendar year, newest year first.
    /// Posts within a year keep the index's date order.
    pub fn by_year(&self) -> Vec<(i32, Vec<&Post>)> {
        let mut years: Vec<(i32, Vec<&Post>)> = Vec::new();
        for post in &self.posts {
            match years.last_mut() {
                Some((year, group)) if *year == post.year() => group.push(post),
                _ => years.push((post.year(), vec![post])),
            }
        }
        years
    }

    /// Per-category counts with display titles, sorted by slug.
    ///
    /// Counts are grouped case-insensitively; the display title comes from
    /// the configured map, falling back to the source casing of the first
    /// post seen in that category.
    pub fn categories(&self, config: &SiteConfig) -> Vec<Category> {
        let mut counts: HashMap<String, (String, usize)> = HashMap::new();
        for post in &self.posts {
            let entry = counts
                .entry(post.category_slug())
                .or_insert_with(|| (post.category.clone(), 0));
            entry.1 += 1;
        }

        let mut categories: Vec<Category> = counts
            .into_iter()
            .map(|(slug, (raw, count))| Category {
                title: config.category_title(&raw),
                slug,
                count,
            })
            .collect();
        categories.sort_by(|a, b| a.slug.cmp(&b.slug));
        categories
    }
}
