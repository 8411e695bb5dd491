//! Content loader - discovers and parses posts from the posts directory

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::markdown::{derive_excerpt, escaped_fallback};
use super::{ContentError, FrontMatter, MarkdownRenderer, Post};
use crate::config::LayoutPolicy;
use crate::Site;

/// Loads posts from the posts directory.
///
/// Files that fail to parse are skipped with a warning; the rest of the index
/// stays intact. A missing posts root is fatal for the whole listing.
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

/// A discovered candidate file, with the category implied by its location
/// (nested layout only).
struct Candidate {
    path: PathBuf,
    dir_category: Option<String>,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &site.config.highlight.theme,
            site.config.highlight.line_number,
        );
        Self { site, renderer }
    }

    /// Load every post under the posts directory, sorted by date descending.
    ///
    /// The sort is stable, so posts sharing a date keep their enumeration
    /// order, and the walk itself is sorted by file name to keep that order
    /// deterministic.
    pub fn load_posts(&self) -> Result<Vec<Post>, ContentError> {
        let candidates = self.locate()?;

        let mut posts = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.load_post(&candidate.path, candidate.dir_category.as_deref()) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("skipping post: {}", e);
                }
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date));

        // The (category, slug) pair is a route key and must stay unique: an
        // explicit front-matter slug can collide with another file's stem.
        // Keep the first (newest) post and skip the rest, like any other
        // unloadable file.
        let mut seen: HashSet<(String, String)> = HashSet::new();
        posts.retain(|post| {
            if seen.insert((post.category_slug(), post.slug.clone())) {
                true
            } else {
                tracing::warn!(
                    "skipping post {:?}: duplicate slug {:?} in category {:?}",
                    post.source,
                    post.slug,
                    post.category
                );
                false
            }
        });

        Ok(posts)
    }

    /// Enumerate candidate post files according to the layout policy.
    fn locate(&self) -> Result<Vec<Candidate>, ContentError> {
        let root = &self.site.posts_dir;
        if !root.is_dir() {
            return Err(ContentError::NotFound { path: root.clone() });
        }

        let max_depth = match self.site.config.layout {
            LayoutPolicy::Flat => 1,
            LayoutPolicy::Nested => 2,
        };

        let mut candidates = Vec::new();
        for entry in WalkDir::new(root)
            .max_depth(max_depth)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let dir_category = match self.site.config.layout {
                LayoutPolicy::Flat => None,
                LayoutPolicy::Nested => path
                    .parent()
                    .filter(|p| *p != root.as_path())
                    .and_then(|p| p.file_name())
                    .and_then(|n| n.to_str())
                    .map(|s| s.to_string()),
            };

            candidates.push(Candidate {
                path: path.to_path_buf(),
                dir_category,
            });
        }

        Ok(candidates)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path, dir_category: Option<&str>) -> Result<Post, ContentError> {
        let content = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;

        let (fm, body) =
            FrontMatter::parse(&content).map_err(|e| ContentError::parse(path, e.to_string()))?;

        let title = fm
            .title
            .clone()
            .ok_or_else(|| ContentError::parse(path, "missing title"))?;

        let date = fm.parse_date().ok_or_else(|| {
            ContentError::parse(
                path,
                format!(
                    "missing or unparseable date: {:?}",
                    fm.date.as_deref().unwrap_or("")
                ),
            )
        })?;

        // Directory name wins under the nested layout; front matter otherwise.
        let category = dir_category
            .map(|s| s.to_string())
            .or_else(|| fm.category.clone())
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.site.config.default_category.clone());

        // Explicit front-matter slug wins over the filename stem.
        let slug = fm.slug.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("untitled")
                .to_string()
        });

        // An explicit excerpt is taken verbatim, never truncated.
        let excerpt = fm
            .excerpt
            .clone()
            .unwrap_or_else(|| derive_excerpt(body, self.site.config.excerpt_length));

        let content_html = match self.renderer.render(body) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("render failed for {:?}, using escaped fallback: {}", path, e);
                escaped_fallback(body)
            }
        };

        Ok(Post {
            slug,
            title,
            date,
            category,
            excerpt,
            raw: body.to_string(),
            content: content_html,
            source: path.to_path_buf(),
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown" || e == "mdx")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site_in(dir: &Path, layout: &str) -> Site {
        fs::write(
            dir.join("_config.yml"),
            format!("layout: {}\nexcerpt_length: 20\n", layout),
        )
        .unwrap();
        Site::new(dir).unwrap()
    }

    fn write_post(dir: &Path, name: &str, front: &str, body: &str) {
        fs::write(dir.join(name), format!("---\n{}---\n\n{}", front, body)).unwrap();
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let site = site_in(tmp.path(), "flat");
        let loader = ContentLoader::new(&site);
        assert!(matches!(
            loader.load_posts(),
            Err(ContentError::NotFound { .. })
        ));
    }

    #[test]
    fn test_empty_root_yields_empty_index() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("posts")).unwrap();
        let site = site_in(tmp.path(), "flat");
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_flat_layout_category_from_front_matter() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();
        write_post(
            &posts_dir,
            "hello.md",
            "title: T\ndate: 2024-03-01\ncategory: react\n",
            "# Hi",
        );
        fs::write(posts_dir.join("notes.txt"), "not a post").unwrap();

        let site = site_in(tmp.path(), "flat");
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        let post = &posts[0];
        assert_eq!(post.title, "T");
        assert_eq!(post.date_str(), "2024-03-01");
        assert_eq!(post.category, "react");
        assert_eq!(post.slug, "hello");
        assert!(post.content.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn test_nested_layout_category_from_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let cat_dir = tmp.path().join("posts").join("webpack");
        fs::create_dir_all(&cat_dir).unwrap();
        write_post(&cat_dir, "config.md", "title: W\ndate: 2024-01-01\n", "body");

        let site = site_in(tmp.path(), "nested");
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].category, "webpack");
    }

    #[test]
    fn test_missing_category_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();
        write_post(&posts_dir, "a.md", "title: A\ndate: 2024-01-01\n", "body");

        let site = site_in(tmp.path(), "flat");
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts[0].category, "uncategorized");
    }

    #[test]
    fn test_malformed_date_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();
        write_post(&posts_dir, "bad.md", "title: B\ndate: not-a-date\n", "x");
        write_post(&posts_dir, "good.md", "title: G\ndate: 2024-05-05\n", "y");

        let site = site_in(tmp.path(), "flat");
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "G");
    }

    #[test]
    fn test_missing_title_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();
        write_post(&posts_dir, "untitled.md", "date: 2024-05-05\n", "x");

        let site = site_in(tmp.path(), "flat");
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_sorted_date_descending() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();
        write_post(&posts_dir, "old.md", "title: Old\ndate: 2022-01-01\n", "x");
        write_post(&posts_dir, "new.md", "title: New\ndate: 2024-01-01\n", "y");
        write_post(&posts_dir, "mid.md", "title: Mid\ndate: 2023-06-15\n", "z");

        let site = site_in(tmp.path(), "flat");
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Mid", "Old"]);
        for pair in posts.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_explicit_excerpt_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();
        write_post(
            &posts_dir,
            "e.md",
            "title: E\ndate: 2024-01-01\nexcerpt: my summary\n",
            &"long body ".repeat(50),
        );

        let site = site_in(tmp.path(), "flat");
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts[0].excerpt, "my summary");
    }

    #[test]
    fn test_derived_excerpt_is_prefix_of_raw() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();
        let body = "word ".repeat(100);
        write_post(&posts_dir, "d.md", "title: D\ndate: 2024-01-01\n", &body);

        // excerpt_length is 20 in the fixture config
        let site = site_in(tmp.path(), "flat");
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        let excerpt = &posts[0].excerpt;
        assert!(excerpt.ends_with('…'));
        assert!(excerpt.chars().count() <= 20 + 1);
        assert!(posts[0].raw.starts_with(excerpt.trim_end_matches('…')));
    }

    #[test]
    fn test_duplicate_slug_in_category_keeps_newest() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();
        write_post(
            &posts_dir,
            "hooks.md",
            "title: First\ndate: 2024-01-01\ncategory: react\n",
            "first body",
        );
        // Explicit slug colliding with the other file's stem, same category
        write_post(
            &posts_dir,
            "other.md",
            "title: Second\ndate: 2024-06-01\ncategory: react\nslug: hooks\n",
            "second body",
        );

        let site = site_in(tmp.path(), "flat");
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Second");
        assert_eq!(posts[0].slug, "hooks");
    }

    #[test]
    fn test_same_slug_different_categories_both_kept() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();
        write_post(
            &posts_dir,
            "a.md",
            "title: A\ndate: 2024-01-01\ncategory: react\nslug: intro\n",
            "x",
        );
        write_post(
            &posts_dir,
            "b.md",
            "title: B\ndate: 2024-02-01\ncategory: webpack\nslug: intro\n",
            "y",
        );

        let site = site_in(tmp.path(), "flat");
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn test_mdx_extension_accepted() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();
        write_post(
            &posts_dir,
            "notes.mdx",
            "title: M\ndate: 2024-04-01\ncategory: react\n",
            "body",
        );

        let site = site_in(tmp.path(), "flat");
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "notes");
    }

    #[test]
    fn test_front_matter_slug_overrides_filename() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();
        write_post(
            &posts_dir,
            "file-name.md",
            "title: S\ndate: 2024-01-01\nslug: custom\n",
            "x",
        );

        let site = site_in(tmp.path(), "flat");
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts[0].slug, "custom");
    }
}
