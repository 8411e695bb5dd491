//! List site content

use anyhow::Result;

use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let index = site.load_index()?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", index.len());
            for post in index.posts() {
                println!(
                    "  {} - {} [{}]",
                    post.date_str(),
                    post.title,
                    post.category
                );
            }
        }
        "category" | "categories" => {
            let categories = index.categories(&site.config);
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!("  {} ({})", category.title, category.count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}
