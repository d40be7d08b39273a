//! `photogrid delete` - remove one photo after confirmation.

use anyhow::Result;

use super::{AppGallery, Layout, load, resolve};
use crate::gallery::{AssumeYes, Confirm, DeleteOutcome, render};
use crate::ui::StdinConfirm;

/// Delete the photo at a grid position or with an id.
///
/// Without `assume_yes` the user is asked on stdin first.
pub async fn execute(gallery: &AppGallery, layout: Layout, target: &str, assume_yes: bool) -> Result<()> {
    load(gallery).await?;
    let photo = resolve(gallery, target)?;

    println!("Photo: {} ({})", photo.filename, photo.id);
    let confirm: &dyn Confirm = if assume_yes { &AssumeYes } else { &StdinConfirm };

    match gallery.delete(&photo.id, confirm).await {
        DeleteOutcome::Deleted => {
            print!("{}", render::render_grid(&gallery.photos(), layout.columns));
            Ok(())
        },
        DeleteOutcome::Cancelled => {
            println!("Cancelled.");
            Ok(())
        },
        DeleteOutcome::Failed => anyhow::bail!("Failed to delete photo '{}'", photo.id),
    }
}
