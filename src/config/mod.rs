//! Site configuration

mod site;

pub use site::{HighlightConfig, LayoutPolicy, SiteConfig};
