//! `photogrid view` - the whole page at once.

use anyhow::Result;

use super::{AppGallery, Layout, load};
use crate::gallery::render;

pub async fn execute(gallery: &AppGallery, layout: Layout) -> Result<()> {
    load(gallery).await?;
    print!(
        "{}",
        render::render_page(
            &gallery.photos(),
            &gallery.histogram(),
            layout.columns,
            layout.chart_width
        )
    );
    Ok(())
}
