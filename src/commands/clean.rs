//! Clean the output directory

use anyhow::Result;
use std::fs;

use crate::Site;

/// Remove the static export output
pub fn run(site: &Site) -> Result<()> {
    if site.out_dir.exists() {
        fs::remove_dir_all(&site.out_dir)?;
        tracing::info!("Deleted: {:?}", site.out_dir);
    }

    Ok(())
}
