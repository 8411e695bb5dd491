//! Initialize a new blog site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    let config_content = r#"# Site
title: My Blog
description: ''
author: ''

# URL
url: http://example.com
root: /

# Directory
posts_dir: posts
out_dir: public
assets_dir: static

# Content
# layout: flat  -> posts/<slug>.md, category in front matter
# layout: nested -> posts/<category>/<slug>.md, category from directory
layout: flat
excerpt_length: 180
default_category: uncategorized

# Display names for category slugs
category_titles:
  javascript: JavaScript
  typescript: TypeScript
  react: React
  webpack: Webpack

highlight:
  theme: base16-ocean.dark
  line_number: true
"#;

    fs::write(target_dir.join("_config.yml"), config_content)?;

    let stylesheet = r#"body { max-width: 48rem; margin: 0 auto; padding: 0 1rem; font-family: sans-serif; }
.site-header nav a { margin-right: 1rem; }
.badge { display: inline-block; padding: 0.1rem 0.6rem; border: 1px solid #ccc; border-radius: 1rem; }
.badge.active { background: #333; color: #fff; }
.post-meta { color: #666; }
.highlight { overflow-x: auto; }
.highlight .gutter { color: #888; padding-right: 0.8rem; user-select: none; }
"#;
    fs::write(target_dir.join("static/style.css"), stylesheet)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
category: uncategorized
---

Welcome to your new blog. This is your first post; edit or delete it and
start writing.

## Fenced code works too

```rust
fn main() {{
    println!("hello");
}}
```
"#,
        now.format("%Y-%m-%d")
    );

    fs::write(target_dir.join("posts/hello-world.md"), sample_post)?;

    Ok(())
}
