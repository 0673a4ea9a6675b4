//! Remote page sources.
//!
//! A source fetches one page at a time by 1-based page number and reports
//! the total record count and the page size it used. Two implementations:
//! - [`HttpPageSource`]: the Art Institute of Chicago artworks API
//! - [`MemoryPageSource`]: an in-memory dataset, with injectable failures

mod http;
mod memory;

use crate::error::Result;
use crate::types::{Keyed, PageData};
use std::future::Future;

pub use http::{decode_response, HttpPageSource};
pub use memory::MemoryPageSource;

/// Fetches pages of records from somewhere slower than memory.
pub trait PageSource {
    type Record: Keyed + Clone + Send;

    /// Fetch page `page` (1-based).
    ///
    /// Fails with [`CatalogError::Fetch`](crate::CatalogError::Fetch) when the
    /// transport fails or the response is not successful.
    fn fetch_page(
        &self,
        page: u32,
    ) -> impl Future<Output = Result<PageData<Self::Record>>> + Send;
}
