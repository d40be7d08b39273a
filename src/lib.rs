//! photogrid - terminal client for a remote photo gallery service.
//!
//! The crate is split the same way the gallery page is:
//!
//! - [`client`] - the photo store client (list, upload, delete over HTTP)
//! - [`histogram`] - per-month upload counts for the sidebar chart
//! - [`gallery`] - the page state and the operations the page exposes
//! - [`commands`] - CLI command handlers built on top of the gallery
//!
//! Configuration lives in [`config`]; terminal helpers in [`ui`].

pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod gallery;
pub mod histogram;
pub mod ui;
pub mod utils;

pub use client::{Photo, PhotoClient, PhotoId, PhotoStore, SelectedFile, TransportError};
pub use gallery::{Confirm, DeleteOutcome, Gallery, Notice, Notifier, UploadOutcome};
pub use histogram::{Bucket, Granularity, upload_histogram};
