//! `photogrid list` - the thumbnail grid.

use anyhow::{Context, Result};

use super::{AppGallery, Layout, load};
use crate::gallery::render;

/// Print the grid, or the raw snapshot as JSON.
pub async fn execute(gallery: &AppGallery, layout: Layout, json: bool) -> Result<()> {
    load(gallery).await?;
    let photos = gallery.photos();

    if json {
        let out = serde_json::to_string_pretty(&photos).context("Failed to serialize photos")?;
        println!("{out}");
    } else {
        print!("{}", render::render_grid(&photos, layout.columns));
    }
    Ok(())
}
