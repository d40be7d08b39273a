//! `photogrid show` - the metadata panel.

use anyhow::Result;

use super::{AppGallery, load, resolve};
use crate::gallery::render;

pub async fn execute(gallery: &AppGallery, target: &str) -> Result<()> {
    load(gallery).await?;
    let photo = resolve(gallery, target)?;

    gallery.open_details(&photo.id);
    if let Some(photo) = gallery.details() {
        print!("{}", render::render_details(&photo));
    }
    Ok(())
}
