//! Text projections of the gallery state.
//!
//! All functions are pure: the same snapshot always renders the same text,
//! so the page is re-rendered from scratch after every state change.

use chrono::Local;
use std::fmt::Write;

use crate::client::Photo;
use crate::constants::INVALID_DATE_LABEL;
use crate::histogram::Bucket;

/// Longest filename shown in a grid cell before truncation.
const CELL_NAME_WIDTH: usize = 24;

const PANEL_WIDTH: usize = 48;

/// Grid of photo cells, `columns` per row, numbered from 1 in list order.
pub fn render_grid(photos: &[Photo], columns: usize) -> String {
    if photos.is_empty() {
        return "No photos yet.\n".to_string();
    }

    let columns = columns.max(1);
    let cells: Vec<String> = photos
        .iter()
        .enumerate()
        .map(|(i, photo)| format!("[{}] {}", i + 1, truncate(&photo.filename, CELL_NAME_WIDTH)))
        .collect();
    let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for row in cells.chunks(columns) {
        let line = row
            .iter()
            .map(|cell| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Metadata panel for one photo.
pub fn render_details(photo: &Photo) -> String {
    let uploaded = match &photo.created_at {
        Some(created_at) => created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => INVALID_DATE_LABEL.to_string(),
    };
    let rule = "-".repeat(PANEL_WIDTH);

    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Photo Details");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Filename: {}", photo.filename);
    let _ = writeln!(out, "Uploaded: {uploaded}");
    let _ = writeln!(out, "URL:      {}", photo.url);
    let _ = writeln!(out, "ID:       {}", photo.id);
    out
}

/// Horizontal bar chart, one line per bucket in histogram order.
///
/// The largest bucket fills `width` columns; any non-zero bucket gets at
/// least one.
pub fn render_chart(buckets: &[Bucket], width: usize) -> String {
    if buckets.is_empty() {
        return "No uploads yet.\n".to_string();
    }

    let width = width.max(1);
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    let label_width = buckets
        .iter()
        .map(|b| b.month.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for bucket in buckets {
        let len = bar_len(bucket.count, max, width);
        let _ = writeln!(
            out,
            "{:<label_width$} | {} {}",
            bucket.month,
            "#".repeat(len),
            bucket.count
        );
    }
    out
}

/// Profile header with the number of posts.
pub fn render_header(photo_count: usize) -> String {
    let rule = "=".repeat(PANEL_WIDTH);
    let noun = if photo_count == 1 { "post" } else { "posts" };
    format!("{rule}\nPhoto Gallery  ({photo_count} {noun})\n{rule}\n")
}

/// The whole page: header, stats sidebar and grid.
pub fn render_page(photos: &[Photo], buckets: &[Bucket], columns: usize, chart_width: usize) -> String {
    let mut out = render_header(photos.len());
    out.push_str("\nUploads per month\n\n");
    out.push_str(&render_chart(buckets, chart_width));
    out.push_str("\nPhotos\n\n");
    out.push_str(&render_grid(photos, columns));
    out
}

fn bar_len(count: usize, max: usize, width: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (count * width).div_ceil(max).max(1)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('~');
    cut
}
