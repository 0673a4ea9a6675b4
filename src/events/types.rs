//! Event and subscription types.

use crate::selection::SelectionState;
use crate::types::RecordId;
use serde::{Deserialize, Serialize};

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered events before dropping subscriber.
    /// Default: 256
    pub buffer_size: usize,

    /// Filter criteria.
    pub filter: EventFilter,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: 256,
            filter: EventFilter::all(),
        }
    }
}

/// Which event families a subscriber wants.
#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    /// Page loaded / superseded events.
    pub include_pages: bool,

    /// Fetch failure events.
    pub include_failures: bool,

    /// Selection change events.
    pub include_selection: bool,
}

impl EventFilter {
    pub fn pages() -> Self {
        Self {
            include_pages: true,
            include_failures: true,
            ..Default::default()
        }
    }

    pub fn selection() -> Self {
        Self {
            include_selection: true,
            ..Default::default()
        }
    }

    pub fn all() -> Self {
        Self {
            include_pages: true,
            include_failures: true,
            include_selection: true,
        }
    }

    pub(crate) fn matches(&self, event: &CatalogEvent) -> bool {
        match event {
            CatalogEvent::PageLoaded { .. } | CatalogEvent::FetchSuperseded { .. } => {
                self.include_pages
            }
            CatalogEvent::FetchFailed { .. } => self.include_failures,
            CatalogEvent::SelectionChanged { .. } => self.include_selection,
            CatalogEvent::Dropped { .. } => true,
        }
    }
}

/// Events published by the page controller.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogEvent {
    /// A page finished loading and is now the visible page.
    PageLoaded {
        page: u32,
        page_size: u32,
        total_records: u64,
        /// Ids of the loaded rows, in display order.
        row_ids: Vec<RecordId>,
        /// Ids on the page that render as checked.
        checked_ids: Vec<RecordId>,
    },

    /// A page load failed; the previous page stays visible.
    FetchFailed { page: u32, message: String },

    /// A response arrived after a newer request was launched and was discarded.
    FetchSuperseded { page: u32, generation: u64 },

    /// The selection changed.
    SelectionChanged {
        selected_count: u64,
        state: SelectionState,
    },

    /// Subscription was dropped.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to receive events from one subscription.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<CatalogEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<CatalogEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<CatalogEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<CatalogEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything currently buffered, without blocking.
    pub fn drain(&self) -> Vec<CatalogEvent> {
        self.receiver.try_iter().collect()
    }
}
