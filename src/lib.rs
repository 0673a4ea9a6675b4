//! # Artwork Catalog
//!
//! Server-side pagination over a remote artwork catalog with row selection
//! that persists across pages, including "select the first N rows" for
//! pages that were never fetched.
//!
//! ## Core Concepts
//!
//! - **Pages**: Records arrive one page at a time from a [`PageSource`]
//! - **Positions**: A row's absolute position is derived from its page number
//!   and page size, so rows that were never fetched can still be reasoned about
//! - **Selection**: Stored as exceptions against an implicit default, never as
//!   the full set of selected ids
//! - **Controller**: Owns the current page, discards superseded responses and
//!   reconciles each loaded page with the selection
//!
//! ## Example
//!
//! ```ignore
//! use artwork_catalog::{CatalogConfig, HttpPageSource, PageController};
//!
//! let config = CatalogConfig::default();
//! let controller = PageController::new(HttpPageSource::new(config.clone())?, &config);
//!
//! controller.load_current().await;
//! controller.select_n_logically(20.0);
//! controller.change_page(2).await;
//!
//! let view = controller.view();
//! println!("Selected: {} rows", view.selected_count);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod format;
pub mod panel;
pub mod selection;
pub mod source;
pub mod types;

// Re-exports
pub use config::CatalogConfig;
pub use controller::{LoadOutcome, PageController, TableView};
pub use error::{CatalogError, Result};
pub use events::{
    CatalogEvent, DropReason, EventFilter, SubscriptionConfig, SubscriptionHandle,
    SubscriptionId, SubscriptionManager,
};
pub use panel::SelectNPanel;
pub use selection::{ModeKind, SelectionEngine, SelectionMode, SelectionState};
pub use source::{decode_response, HttpPageSource, MemoryPageSource, PageSource};
pub use types::*;
