//! Export the static site

use anyhow::Result;

use crate::generator::Generator;
use crate::Site;

/// Build the static export into the output directory
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let index = site.load_index()?;
    tracing::info!("loaded {} posts", index.len());

    Generator::new(site)?.generate(&index)?;

    tracing::info!("built in {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
