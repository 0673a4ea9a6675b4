//! Core types for the artwork catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a record in the remote dataset.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId(id)
    }
}

/// Anything the selection engine can track: it only ever looks at the id.
pub trait Keyed {
    fn key(&self) -> RecordId;
}

impl Keyed for RecordId {
    fn key(&self) -> RecordId {
        *self
    }
}

/// One artwork row as displayed in the catalog table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i64>,
    #[serde(default)]
    pub date_end: Option<i64>,
}

impl Artwork {
    /// An artwork with only its id set.
    pub fn bare(id: u64) -> Self {
        Self {
            id: RecordId(id),
            title: None,
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Keyed for Artwork {
    fn key(&self) -> RecordId {
        self.id
    }
}

/// Result of a single remote fetch: the rows plus pagination metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct PageData<R> {
    pub records: Vec<R>,
    pub total_records: u64,
    pub page_size: u32,
}

/// An ordered run of records tagged with where it came from.
///
/// The page number and page size are the ones in effect at fetch time; the
/// absolute position of each row is derived from them.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<R> {
    /// 1-based page number.
    pub number: u32,

    /// Page size reported by the source for this fetch.
    pub page_size: u32,

    pub records: Vec<R>,
}

impl<R> Page<R> {
    pub fn new(number: u32, page_size: u32, records: Vec<R>) -> Self {
        Self {
            number,
            page_size,
            records,
        }
    }

    /// A page with no rows, used before anything has been loaded.
    pub fn empty(page_size: u32) -> Self {
        Self::new(1, page_size, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows paired with their 1-based absolute position in the dataset.
    pub fn positioned(&self) -> impl Iterator<Item = (u64, &R)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(move |(index, row)| (absolute_position(self.number, self.page_size, index), row))
    }
}

/// 1-based position of the row at `index` on `page` in the remote order.
pub fn absolute_position(page: u32, page_size: u32, index: usize) -> u64 {
    u64::from(page.saturating_sub(1))
        .saturating_mul(u64::from(page_size))
        .saturating_add(index as u64)
        .saturating_add(1)
}

/// Clamp a requested row count into `[0, total_records]`.
///
/// Non-finite and negative input become 0, fractions are floored.
pub fn clamp_count(count: f64, total_records: u64) -> u64 {
    if !count.is_finite() {
        return 0;
    }

    let normalized = count.floor();
    if normalized <= 0.0 {
        0
    } else if normalized >= total_records as f64 {
        total_records
    } else {
        normalized as u64
    }
}

/// Number of pages needed for `total_records`, never less than 1.
pub fn total_pages(total_records: u64, page_size: u32) -> u32 {
    if page_size == 0 || total_records == 0 {
        return 1;
    }
    let pages = total_records.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}
