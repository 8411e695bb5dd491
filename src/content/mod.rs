//! Content module - post discovery, front matter, and rendering

mod error;
mod frontmatter;
pub mod loader;
pub mod markdown;
mod post;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{Category, Post};
