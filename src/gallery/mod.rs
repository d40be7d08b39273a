//! The gallery page: state plus the operations the page exposes.
//!
//! [`Gallery`] owns the current photo snapshot, the selected file, the
//! loading flag and the open metadata panel. It talks to a [`PhotoStore`]
//! and reports to the user through a [`Notifier`].
//!
//! - Every successful upload or delete is followed by an explicit
//!   [`Gallery::refresh`]; failed ones are not.
//! - A failed list keeps the previous snapshot.
//! - Only upload is mutually excluded (the loading flag). List and delete
//!   may overlap; whichever list resolves last wins.
//!
//! The state lock is never held across an `.await`, so operations take
//! `&self` and can be in flight concurrently on one event loop.

pub mod render;

use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::client::{Photo, PhotoId, PhotoStore, SelectedFile};
use crate::histogram::{Bucket, Granularity, upload_histogram_in};

/// Prompt shown before a delete.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this photo?";

/// A blocking notification for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoFileSelected,
    UploadSucceeded,
    UploadFailed,
    DeleteSucceeded,
    DeleteFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Self::NoFileSelected => "Select a file first!",
            Self::UploadSucceeded => "Uploaded successfully!",
            Self::UploadFailed => "Upload failed!",
            Self::DeleteSucceeded => "Photo deleted successfully!",
            Self::DeleteFailed => "Failed to delete photo.",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Self::NoFileSelected | Self::UploadFailed | Self::DeleteFailed)
    }
}

/// Where notifications and the loading indicator go.
pub trait Notifier: Send + Sync {
    /// Show a notification. Blocks until the user has seen it.
    fn notify(&self, notice: Notice);

    /// The loading flag changed.
    fn loading_changed(&self, _loading: bool) {}
}

/// Explicit user confirmation for destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirms everything (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Result of [`Gallery::upload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Uploaded; the snapshot was refreshed afterwards.
    Uploaded,
    /// Nothing selected; no request was made.
    NoFileSelected,
    /// Another upload is in flight; no request was made.
    Busy,
    /// The service rejected the upload or could not be reached.
    Failed,
}

/// Result of [`Gallery::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Deleted; the snapshot was refreshed afterwards.
    Deleted,
    /// The user declined; no request was made.
    Cancelled,
    /// The service rejected the delete or could not be reached.
    Failed,
}

#[derive(Debug, Default)]
struct ViewState {
    photos: Vec<Photo>,
    selected: Option<SelectedFile>,
    loading: bool,
    details: Option<PhotoId>,
}

enum UploadStart {
    Ready(SelectedFile),
    Busy,
    NoFile,
}

/// The gallery page.
pub struct Gallery<S, N> {
    store: S,
    notifier: N,
    granularity: Granularity,
    state: Mutex<ViewState>,
}

impl<S: PhotoStore, N: Notifier> Gallery<S, N> {
    /// Create an empty gallery. Call [`Gallery::refresh`] for the initial load.
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            granularity: Granularity::default(),
            state: Mutex::new(ViewState::default()),
        }
    }

    /// Set how the histogram labels buckets.
    #[must_use]
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Re-fetch the full list and replace the snapshot.
    ///
    /// Returns `false` on failure, leaving the previous snapshot in place.
    /// List failures are logged only.
    pub async fn refresh(&self) -> bool {
        match self.store.list_photos().await {
            Ok(photos) => {
                debug!(count = photos.len(), "Replacing photo snapshot");
                let mut state = self.state.lock();
                if let Some(open) = &state.details
                    && !photos.iter().any(|photo| &photo.id == open)
                {
                    state.details = None;
                }
                state.photos = photos;
                true
            },
            Err(e) => {
                error!(error = %e, "Error fetching photos");
                false
            },
        }
    }

    /// Pick the file the next upload sends.
    pub fn select_file(&self, file: SelectedFile) {
        self.state.lock().selected = Some(file);
    }

    pub fn clear_selection(&self) {
        self.state.lock().selected = None;
    }

    pub fn selected_file_name(&self) -> Option<String> {
        self.state
            .lock()
            .selected
            .as_ref()
            .map(|file| file.filename.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// Upload the selected file, then refresh.
    pub async fn upload(&self) -> UploadOutcome {
        let start = {
            let mut state = self.state.lock();
            if state.loading {
                UploadStart::Busy
            } else if let Some(file) = state.selected.clone() {
                state.loading = true;
                UploadStart::Ready(file)
            } else {
                UploadStart::NoFile
            }
        };

        let file = match start {
            UploadStart::Ready(file) => file,
            UploadStart::Busy => {
                debug!("Upload already in progress");
                return UploadOutcome::Busy;
            },
            UploadStart::NoFile => {
                self.notifier.notify(Notice::NoFileSelected);
                return UploadOutcome::NoFileSelected;
            },
        };

        self.notifier.loading_changed(true);
        let filename = file.filename.clone();
        let result = self.store.upload_photo(file).await;
        self.state.lock().loading = false;
        self.notifier.loading_changed(false);

        match result {
            Ok(()) => {
                info!(filename = %filename, "Photo uploaded");
                self.notifier.notify(Notice::UploadSucceeded);
                self.clear_selection();
                self.refresh().await;
                UploadOutcome::Uploaded
            },
            Err(e) => {
                error!(filename = %filename, error = %e, "Error uploading photo");
                self.notifier.notify(Notice::UploadFailed);
                UploadOutcome::Failed
            },
        }
    }

    /// Delete a photo after confirmation, then refresh.
    pub async fn delete<C>(&self, id: &PhotoId, confirm: &C) -> DeleteOutcome
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!(id = %id, "Delete cancelled");
            return DeleteOutcome::Cancelled;
        }

        match self.store.delete_photo(id).await {
            Ok(()) => {
                info!(id = %id, "Photo deleted");
                self.notifier.notify(Notice::DeleteSucceeded);
                self.refresh().await;
                DeleteOutcome::Deleted
            },
            Err(e) => {
                error!(id = %id, error = %e, "Error deleting photo");
                self.notifier.notify(Notice::DeleteFailed);
                DeleteOutcome::Failed
            },
        }
    }

    /// Clone of the current snapshot.
    pub fn photos(&self) -> Vec<Photo> {
        self.state.lock().photos.clone()
    }

    /// Resolve a user-supplied target: an id first, then a 1-based grid position.
    pub fn find(&self, target: &str) -> Option<Photo> {
        let state = self.state.lock();
        let target = target.trim();

        if let Some(photo) = state.photos.iter().find(|p| p.id.as_str() == target) {
            return Some(photo.clone());
        }

        target
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| state.photos.get(index))
            .cloned()
    }

    /// Open the metadata panel. Returns `false` if the photo is not in the snapshot.
    pub fn open_details(&self, id: &PhotoId) -> bool {
        let mut state = self.state.lock();
        if state.photos.iter().any(|photo| &photo.id == id) {
            state.details = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn close_details(&self) {
        self.state.lock().details = None;
    }

    /// Photo shown in the metadata panel, if any.
    pub fn details(&self) -> Option<Photo> {
        let state = self.state.lock();
        let open = state.details.as_ref()?;
        state.photos.iter().find(|photo| &photo.id == open).cloned()
    }

    /// Upload histogram of the current snapshot, in local time.
    pub fn histogram(&self) -> Vec<Bucket> {
        upload_histogram_in(&self.state.lock().photos, &chrono::Local, self.granularity)
    }
}
