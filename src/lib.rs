//! sumi: a small markdown blog engine
//!
//! Markdown files on disk are parsed, categorized, rendered to HTML, and
//! either served through server-rendered pages or exported as a static site.
//! The index is rebuilt from scratch on every request and every build pass;
//! nothing is cached between invocations.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod index;
pub mod routes;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// A blog site rooted at a directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Posts source directory
    pub posts_dir: std::path::PathBuf,
    /// Output directory for static export
    pub out_dir: std::path::PathBuf,
    /// Static assets directory (css, images)
    pub assets_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let out_dir = base_dir.join(&config.out_dir);
        let assets_dir = base_dir.join(&config.assets_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            out_dir,
            assets_dir,
        })
    }

    /// Scan the posts directory and build a fresh index
    pub fn load_index(&self) -> Result<index::PostIndex, content::ContentError> {
        let loader = content::loader::ContentLoader::new(self);
        let posts = loader.load_posts()?;
        Ok(index::PostIndex::new(posts))
    }

    /// Export the static site
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Remove the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
