//! Static path enumeration
//!
//! Derives the exhaustive set of routable keys for static export: every
//! (category, slug) pair for detail pages and every category slug for
//! category pages. The export has no server fallback, so this enumeration
//! must cover every route the site can link to.

use serde::Serialize;

use crate::index::PostIndex;

/// Route key for one post detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRoute {
    pub category: String,
    pub slug: String,
}

impl PostRoute {
    pub fn url(&self) -> String {
        format!("/posts/{}/{}", self.category, self.slug)
    }
}

/// The complete set of routable keys derived from an index
#[derive(Debug, Clone)]
pub struct RouteSet {
    pub posts: Vec<PostRoute>,
    pub categories: Vec<String>,
}

impl RouteSet {
    /// Enumerate every route the index can link to.
    ///
    /// Category routes come from the posts themselves, so a category with no
    /// posts never appears here.
    pub fn enumerate(index: &PostIndex) -> Self {
        let posts: Vec<PostRoute> = index
            .posts()
            .iter()
            .map(|p| PostRoute {
                category: p.category_slug(),
                slug: p.slug.clone(),
            })
            .collect();

        let mut categories: Vec<String> = posts.iter().map(|r| r.category.clone()).collect();
        categories.sort();
        categories.dedup();

        Self { posts, categories }
    }

    pub fn category_url(slug: &str) -> String {
        format!("/categories/{}", slug)
    }
}
