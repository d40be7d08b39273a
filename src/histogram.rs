//! Upload histogram for the sidebar chart.
//!
//! Groups photos by the month of their creation timestamp. Buckets come out
//! in first-occurrence order of the input, not calendar order, and with the
//! default [`Granularity::Month`] the same month of different years lands in
//! one bucket. Photos without a readable timestamp share one
//! `Invalid Date` bucket.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::client::Photo;
use crate::constants::INVALID_DATE_LABEL;

/// How bucket labels are derived from a timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Short month name only, e.g. `Mar`.
    #[default]
    Month,
    /// Short month name and year, e.g. `Mar 2024`.
    MonthYear,
}

impl Granularity {
    fn format(self) -> &'static str {
        match self {
            Self::Month => "%b",
            Self::MonthYear => "%b %Y",
        }
    }
}

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub month: String,
    pub count: usize,
}

impl Bucket {
    pub fn new(month: impl Into<String>, count: usize) -> Self {
        Self {
            month: month.into(),
            count,
        }
    }
}

/// Histogram of uploads per short month name, in the local time zone.
pub fn upload_histogram(photos: &[Photo]) -> Vec<Bucket> {
    upload_histogram_in(photos, &Local, Granularity::Month)
}

/// Histogram of uploads in an explicit time zone and granularity.
pub fn upload_histogram_in<Tz>(photos: &[Photo], tz: &Tz, granularity: Granularity) -> Vec<Bucket>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut buckets: Vec<Bucket> = Vec::new();

    for photo in photos {
        let label = match &photo.created_at {
            Some(created_at) => created_at
                .with_timezone(tz)
                .format(granularity.format())
                .to_string(),
            None => INVALID_DATE_LABEL.to_string(),
        };

        match buckets.iter_mut().find(|bucket| bucket.month == label) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(Bucket::new(label, 1)),
        }
    }

    buckets
}
