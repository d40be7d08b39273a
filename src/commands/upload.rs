//! `photogrid upload` - send one file to the service.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

use super::{AppGallery, Layout, load};
use crate::client::{PhotoStore, SelectedFile};
use crate::gallery::{Gallery, Notifier, UploadOutcome, render};
use crate::utils::format_bytes;

/// Read `path`, upload it, and print the refreshed grid.
pub async fn execute(gallery: &AppGallery, layout: Layout, path: &Path) -> Result<()> {
    run(gallery, layout, path, &mut io::stdout()).await
}

/// Load the gallery, upload `path`, and write the grid to `out`.
///
/// A failed initial load fails the command before anything is sent.
pub async fn run<S, N, W>(gallery: &Gallery<S, N>, layout: Layout, path: &Path, out: &mut W) -> Result<()>
where
    S: PhotoStore,
    N: Notifier,
    W: Write,
{
    load(gallery).await?;
    let (filename, size) = select(gallery, path).await?;
    writeln!(out, "Uploading {filename} ({})", format_bytes(size as u64))?;

    match gallery.upload().await {
        UploadOutcome::Uploaded => {
            write!(out, "{}", render::render_grid(&gallery.photos(), layout.columns))?;
            Ok(())
        },
        UploadOutcome::NoFileSelected => anyhow::bail!("No file selected"),
        UploadOutcome::Busy => anyhow::bail!("Another upload is already in progress"),
        UploadOutcome::Failed => anyhow::bail!("Upload of '{}' failed", path.display()),
    }
}

/// Read a file from disk and make it the gallery's selection.
///
/// Returns the selected filename and size. Non-image files are allowed but
/// warned about.
pub async fn select<S: PhotoStore, N: Notifier>(
    gallery: &Gallery<S, N>,
    path: &Path,
) -> Result<(String, usize)> {
    let file = SelectedFile::from_path(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    if !file.is_image() {
        tracing::warn!(
            filename = %file.filename,
            mime = %file.mime,
            "Selected file does not look like an image"
        );
    }

    let selected = (file.filename.clone(), file.len());
    gallery.select_file(file);
    Ok(selected)
}
