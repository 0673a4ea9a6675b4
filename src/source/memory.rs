//! In-memory page source.

use crate::error::{CatalogError, Result};
use crate::types::{Keyed, PageData};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::PageSource;

/// Serves pages out of a vector held in memory.
///
/// Pages can be marked as failing to exercise the fetch-error path.
pub struct MemoryPageSource<R> {
    records: Vec<R>,
    page_size: u32,
    failing: Mutex<HashSet<u32>>,
    fetches: AtomicUsize,
}

impl<R> MemoryPageSource<R> {
    pub fn new(records: Vec<R>, page_size: u32) -> Self {
        Self {
            records,
            page_size,
            failing: Mutex::new(HashSet::new()),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Make every fetch of `page` fail until [`recover_page`](Self::recover_page).
    pub fn fail_page(&self, page: u32) {
        self.failing.lock().insert(page);
    }

    pub fn recover_page(&self, page: u32) {
        self.failing.lock().remove(&page);
    }

    /// Number of fetches attempted so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn total_records(&self) -> u64 {
        self.records.len() as u64
    }
}

impl<R: Clone> MemoryPageSource<R> {
    fn slice(&self, page: u32) -> Vec<R> {
        if self.page_size == 0 || page == 0 {
            return Vec::new();
        }
        let size = self.page_size as usize;
        let start = (page as usize - 1).saturating_mul(size);
        if start >= self.records.len() {
            return Vec::new();
        }
        let end = (start + size).min(self.records.len());
        self.records[start..end].to_vec()
    }
}

impl<R> PageSource for MemoryPageSource<R>
where
    R: Keyed + Clone + Send + Sync,
{
    type Record = R;

    async fn fetch_page(&self, page: u32) -> Result<PageData<R>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.failing.lock().contains(&page) {
            return Err(CatalogError::fetch(page, "source unavailable"));
        }

        Ok(PageData {
            records: self.slice(page),
            total_records: self.total_records(),
            page_size: self.page_size,
        })
    }
}
