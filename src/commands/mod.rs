//! CLI command implementations for photogrid.
//!
//! Each submodule implements one command on top of a [`Gallery`]:
//!
//! - [`list`] - thumbnail grid (or JSON) of all photos
//! - [`show`] - metadata panel for one photo
//! - [`upload`] - upload a file, then re-list
//! - [`delete`] - delete after confirmation, then re-list
//! - [`stats`] - per-month upload chart
//! - [`view`] - the whole page
//! - [`shell`] - interactive page

pub mod delete;
pub mod list;
pub mod shell;
pub mod show;
pub mod stats;
pub mod upload;
pub mod view;

use anyhow::{Context, Result};

use crate::client::{Photo, PhotoClient, PhotoStore};
use crate::config::Config;
use crate::gallery::{Gallery, Notifier};
use crate::ui::TerminalNotifier;

/// Gallery wired to the HTTP client and the terminal.
pub type AppGallery = Gallery<PhotoClient, TerminalNotifier>;

/// Rendering settings shared by the commands.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub columns: usize,
    pub chart_width: usize,
}

impl Layout {
    pub fn from_config(config: &Config) -> Self {
        Self {
            columns: config.grid.columns,
            chart_width: config.histogram.chart_width,
        }
    }
}

/// Build the gallery for the configured service.
///
/// # Errors
///
/// Returns an error if no base URL is configured or it is invalid.
pub fn connect(config: &Config) -> Result<AppGallery> {
    let base_url = config.base_url()?;
    let client = PhotoClient::with_timeout(base_url, config.timeout())
        .with_context(|| format!("Invalid photo service URL: {base_url}"))?;

    tracing::debug!(base_url = %client.base_url(), "Using photo service");
    Ok(Gallery::new(client, TerminalNotifier::new()).with_granularity(config.granularity()))
}

/// Initial load for one-shot commands; a failed list is fatal here.
pub async fn load<S: PhotoStore, N: Notifier>(gallery: &Gallery<S, N>) -> Result<()> {
    if !gallery.refresh().await {
        anyhow::bail!(
            "Could not load photos from the service.\n\
             Run with -v for details, or check the base URL and that the service is up."
        );
    }
    Ok(())
}

/// Resolve a grid position or id against the loaded snapshot.
pub fn resolve<S: PhotoStore, N: Notifier>(gallery: &Gallery<S, N>, target: &str) -> Result<Photo> {
    gallery.find(target).with_context(|| {
        format!("No photo '{target}'. Use a grid number from `photogrid list` or a photo id.")
    })
}
