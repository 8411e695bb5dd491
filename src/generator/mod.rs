//! Static export - renders every enumerable route to the output directory

use anyhow::Result;
use std::fs;
use std::path::Path;
use tera::Context;
use walkdir::WalkDir;

use crate::index::PostIndex;
use crate::routes::RouteSet;
use crate::templates::{CategoryView, PostView, SiteView, TemplateRenderer, YearView};
use crate::Site;

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            site: site.clone(),
            renderer,
        })
    }

    /// Export the entire site.
    ///
    /// The written tree mirrors the server's routes exactly; a deployed
    /// export has no server fallback, so every linkable route gets a page.
    pub fn generate(&self, index: &PostIndex) -> Result<()> {
        fs::create_dir_all(&self.site.out_dir)?;

        self.copy_assets()?;

        let config = &self.site.config;
        let site_view = SiteView::from_config(config);
        let categories: Vec<CategoryView> = index
            .categories(config)
            .iter()
            .map(CategoryView::from_category)
            .collect();
        let routes = RouteSet::enumerate(index);

        // Home: all posts with the category filter bar
        let mut context = Context::new();
        context.insert("site", &site_view);
        context.insert("categories", &categories);
        context.insert("active_category", &tera::Value::Null);
        let posts: Vec<PostView> = index
            .posts()
            .iter()
            .map(|p| PostView::from_post(p, config))
            .collect();
        context.insert("posts", &posts);
        self.write_page("index.html", &self.renderer.render("index.html", &context)?)?;

        // Archive: /posts grouped by year
        let years: Vec<YearView> = index
            .by_year()
            .into_iter()
            .map(|(year, posts)| YearView {
                year,
                posts: posts
                    .into_iter()
                    .map(|p| PostView::from_post(p, config))
                    .collect(),
            })
            .collect();
        let mut context = Context::new();
        context.insert("site", &site_view);
        context.insert("years", &years);
        self.write_page(
            "posts/index.html",
            &self.renderer.render("archive.html", &context)?,
        )?;

        // Post detail pages
        for route in &routes.posts {
            let post = index
                .get(&route.category, &route.slug)
                .ok_or_else(|| anyhow::anyhow!("route without post: {}", route.url()))?;
            let mut context = Context::new();
            context.insert("site", &site_view);
            context.insert("categories", &categories);
            context.insert("post", &PostView::from_post(post, config));
            self.write_page(
                &format!("posts/{}/{}/index.html", route.category, route.slug),
                &self.renderer.render("post.html", &context)?,
            )?;
        }

        // Category browsing
        let mut context = Context::new();
        context.insert("site", &site_view);
        context.insert("categories", &categories);
        self.write_page(
            "categories/index.html",
            &self.renderer.render("categories.html", &context)?,
        )?;

        for category in &categories {
            let posts: Vec<PostView> = index
                .by_category(&category.slug)
                .into_iter()
                .map(|p| PostView::from_post(p, config))
                .collect();
            let mut context = Context::new();
            context.insert("site", &site_view);
            context.insert("category", category);
            context.insert("posts", &posts);
            self.write_page(
                &format!("categories/{}/index.html", category.slug),
                &self.renderer.render("category.html", &context)?,
            )?;
        }

        // Unmatched routes in a static deployment land here
        let mut context = Context::new();
        context.insert("site", &site_view);
        self.write_page("404.html", &self.renderer.render("not_found.html", &context)?)?;

        tracing::info!(
            "exported {} posts, {} categories",
            routes.posts.len(),
            routes.categories.len()
        );

        Ok(())
    }

    /// Write one rendered page under the output directory
    fn write_page(&self, relative: &str, html: &str) -> Result<()> {
        let path = self.site.out_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html)?;
        tracing::debug!("wrote {:?}", path);
        Ok(())
    }

    /// Copy the static assets directory into the output tree
    fn copy_assets(&self) -> Result<()> {
        if !self.site.assets_dir.is_dir() {
            return Ok(());
        }

        let target_root = self.site.out_dir.join("static");
        for entry in WalkDir::new(&self.site.assets_dir)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(&self.site.assets_dir).unwrap_or(path);
            let target = target_root.join(relative);
            copy_file(path, &target)?;
        }

        Ok(())
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_post(dir: &Path, name: &str, front: &str, body: &str) {
        fs::write(dir.join(name), format!("---\n{}---\n\n{}", front, body)).unwrap();
    }

    #[test]
    fn test_export_covers_every_route() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();
        write_post(
            &posts_dir,
            "hooks.md",
            "title: Hooks\ndate: 2024-03-01\ncategory: react\n",
            "# Hi",
        );
        write_post(
            &posts_dir,
            "loaders.md",
            "title: Loaders\ndate: 2024-02-01\ncategory: webpack\n",
            "body",
        );

        let site = Site::new(tmp.path()).unwrap();
        let index = site.load_index().unwrap();
        Generator::new(&site).unwrap().generate(&index).unwrap();

        let out = tmp.path().join("public");
        assert!(out.join("index.html").is_file());
        assert!(out.join("posts/index.html").is_file());
        assert!(out.join("posts/react/hooks/index.html").is_file());
        assert!(out.join("posts/webpack/loaders/index.html").is_file());
        assert!(out.join("categories/index.html").is_file());
        assert!(out.join("categories/react/index.html").is_file());
        assert!(out.join("categories/webpack/index.html").is_file());
        assert!(out.join("404.html").is_file());

        let detail = fs::read_to_string(out.join("posts/react/hooks/index.html")).unwrap();
        assert!(detail.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn test_export_empty_site() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("posts")).unwrap();

        let site = Site::new(tmp.path()).unwrap();
        let index = site.load_index().unwrap();
        Generator::new(&site).unwrap().generate(&index).unwrap();

        let home = fs::read_to_string(tmp.path().join("public/index.html")).unwrap();
        assert!(home.contains("No posts yet."));
    }
}
