//! Event fan-out for the presentation layer.
//!
//! The page controller publishes an event after every state change a view
//! would need to redraw for:
//! - a page finished loading
//! - a page failed to load, or its response arrived after a newer request
//! - the selection changed
//!
//! Each subscriber gets a bounded channel; a subscriber that falls behind is
//! dropped rather than stalling the controller.
//!
//! # Example
//!
//! ```ignore
//! let handle = controller.events().subscribe(SubscriptionConfig {
//!     filter: EventFilter::selection(),
//!     ..Default::default()
//! });
//!
//! while let Ok(event) = handle.recv() {
//!     if let CatalogEvent::SelectionChanged { selected_count, .. } = event {
//!         println!("Selected: {selected_count} rows");
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    CatalogEvent, DropReason, EventFilter, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
};
