//! Create a new post skeleton

use anyhow::Result;
use std::fs;

use crate::config::LayoutPolicy;
use crate::Site;

/// Create a new post file with front-matter scaffolding.
///
/// Under the flat layout the category lands in the front matter; under the
/// nested layout it becomes the subdirectory.
pub fn run(site: &Site, title: &str, category: Option<&str>) -> Result<()> {
    let now = chrono::Local::now();
    let post_slug = slug::slugify(title);
    let category = category.unwrap_or(&site.config.default_category);

    let (target_dir, front_category) = match site.config.layout {
        LayoutPolicy::Flat => (site.posts_dir.clone(), Some(category)),
        LayoutPolicy::Nested => (site.posts_dir.join(slug::slugify(category)), None),
    };

    fs::create_dir_all(&target_dir)?;
    let file_path = target_dir.join(format!("{}.md", post_slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut content = format!("---\ntitle: {}\ndate: {}\n", title, now.format("%Y-%m-%d"));
    if let Some(cat) = front_category {
        content.push_str(&format!("category: {}\n", cat));
    }
    content.push_str("---\n\n");

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}
