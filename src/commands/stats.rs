//! `photogrid stats` - uploads per month.

use anyhow::Result;

use super::{AppGallery, Layout, load};
use crate::gallery::render;

pub async fn execute(gallery: &AppGallery, layout: Layout) -> Result<()> {
    load(gallery).await?;
    print!("{}", render::render_chart(&gallery.histogram(), layout.chart_width));
    Ok(())
}
