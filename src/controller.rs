//! Page controller tying the page source, the selection engine and event
//! subscribers together.

use crate::config::CatalogConfig;
use crate::events::{CatalogEvent, SubscriptionManager};
use crate::format::{entry_range, visible_pages};
use crate::selection::{SelectionEngine, SelectionState};
use crate::source::PageSource;
use crate::types::{total_pages, Keyed, Page, RecordId};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// What happened to a page load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page is now visible.
    Loaded,
    /// The fetch failed; the previous page is still visible.
    Failed(String),
    /// A newer load was launched while this one was in flight; its result
    /// was discarded.
    Superseded,
    /// The requested page was out of range or already current; nothing was
    /// fetched.
    Unchanged,
}

/// Everything a table view needs to render one frame.
#[derive(Clone, Debug)]
pub struct TableView<R> {
    pub page: Page<R>,
    pub checked_ids: HashSet<RecordId>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_records: u64,
    pub selected_count: u64,
    /// First and last 1-based entry shown, `(0, 0)` when empty.
    pub entry_range: (u64, u64),
    /// Page links to offer in the footer.
    pub page_links: Vec<u32>,
    pub loading: bool,
    pub error: Option<String>,
    pub clear_disabled: bool,
}

/// Mutable controller state. Never held across an await point.
struct ControllerState<R> {
    current_page: u32,
    visible: Page<R>,
    total_records: u64,
    page_size: u32,
    loading: bool,
    error: Option<String>,
    selection: SelectionEngine,
}

impl<R> ControllerState<R> {
    fn total_pages(&self) -> u32 {
        total_pages(self.total_records, self.page_size)
    }
}

/// Owns the current page and the selection for a remote paginated dataset.
///
/// Loads may overlap: each one takes a generation number at launch and only
/// the latest generation is allowed to touch state once its fetch returns.
pub struct PageController<S: PageSource> {
    source: S,
    state: Mutex<ControllerState<S::Record>>,
    generation: AtomicU64,
    events: SubscriptionManager,
}

impl<S: PageSource> PageController<S> {
    /// Create a controller on page 1 with nothing loaded yet.
    pub fn new(source: S, config: &CatalogConfig) -> Self {
        Self::with_page_size(source, config.default_page_size)
    }

    /// Create a controller assuming `page_size` until the first fetch.
    pub fn with_page_size(source: S, page_size: u32) -> Self {
        Self {
            source,
            state: Mutex::new(ControllerState {
                current_page: 1,
                visible: Page::empty(page_size),
                total_records: 0,
                page_size,
                loading: false,
                error: None,
                selection: SelectionEngine::new(),
            }),
            generation: AtomicU64::new(0),
            events: SubscriptionManager::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn events(&self) -> &SubscriptionManager {
        &self.events
    }

    // --- Paging ---

    pub fn current_page(&self) -> u32 {
        self.state.lock().current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.state.lock().total_pages()
    }

    pub fn total_records(&self) -> u64 {
        self.state.lock().total_records
    }

    pub fn page_size(&self) -> u32 {
        self.state.lock().page_size
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// Message of the last failed load, cleared when a new load starts.
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// The page currently on screen.
    pub fn visible_page(&self) -> Page<S::Record> {
        self.state.lock().visible.clone()
    }

    /// Move to page `next` and load it.
    ///
    /// Out-of-range pages and the current page are ignored.
    pub async fn change_page(&self, next: u32) -> LoadOutcome {
        let generation = {
            let mut state = self.state.lock();
            if next < 1 || next > state.total_pages() || next == state.current_page {
                debug!(next, current = state.current_page, "page change ignored");
                return LoadOutcome::Unchanged;
            }
            state.current_page = next;
            self.begin_load(&mut state)
        };

        self.load_page(next, generation).await
    }

    /// Load the current page: the initial load, or a retry after a failure.
    pub async fn load_current(&self) -> LoadOutcome {
        let (page, generation) = {
            let mut state = self.state.lock();
            let page = state.current_page;
            (page, self.begin_load(&mut state))
        };
        self.load_page(page, generation).await
    }

    /// Claim the next generation. Called under the state lock so the latest
    /// generation always belongs to `current_page`.
    fn begin_load(&self, state: &mut ControllerState<S::Record>) -> u64 {
        state.loading = true;
        state.error = None;
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn superseded(&self, page: u32, generation: u64) -> LoadOutcome {
        debug!(page, generation, "discarding superseded page response");
        self.events
            .publish(CatalogEvent::FetchSuperseded { page, generation });
        LoadOutcome::Superseded
    }

    async fn load_page(&self, page: u32, generation: u64) -> LoadOutcome {
        debug!(page, generation, "page load started");

        let result = self.source.fetch_page(page).await;

        match result {
            Ok(data) => {
                let (loaded, changed) = {
                    let mut guard = self.state.lock();
                    // New generations are only claimed under this lock.
                    if !self.is_latest(generation) {
                        drop(guard);
                        return self.superseded(page, generation);
                    }
                    let state = &mut *guard;
                    state.total_records = data.total_records;
                    state.page_size = data.page_size;
                    state.visible = Page::new(page, data.page_size, data.records);
                    state.loading = false;

                    let dropped = state.selection.sync_logical_target(&state.visible);
                    if dropped > 0 {
                        debug!(page, dropped, "stale overrides dropped on load");
                    }

                    let loaded = CatalogEvent::PageLoaded {
                        page,
                        page_size: data.page_size,
                        total_records: data.total_records,
                        row_ids: state.visible.records.iter().map(Keyed::key).collect(),
                        checked_ids: state
                            .selection
                            .page_selection(&state.visible)
                            .into_iter()
                            .map(Keyed::key)
                            .collect(),
                    };
                    let changed = if dropped > 0 {
                        Some(selection_event(state))
                    } else {
                        None
                    };
                    (loaded, changed)
                };

                info!(page, total_records = data.total_records, "page loaded");
                self.events.publish(loaded);
                if let Some(event) = changed {
                    self.events.publish(event);
                }
                LoadOutcome::Loaded
            }
            Err(e) => {
                let message = e.user_message();
                {
                    let mut state = self.state.lock();
                    if !self.is_latest(generation) {
                        drop(state);
                        return self.superseded(page, generation);
                    }
                    state.error = Some(message.clone());
                    state.loading = false;
                }
                warn!(page, error = %message, "page load failed");
                self.events.publish(CatalogEvent::FetchFailed {
                    page,
                    message: message.clone(),
                });
                LoadOutcome::Failed(message)
            }
        }
    }

    // --- Selection ---

    /// Rows on the visible page that render as checked.
    pub fn page_selection(&self) -> Vec<S::Record> {
        let state = self.state.lock();
        state
            .selection
            .page_selection(&state.visible)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The user set the visible page's checked rows to exactly `selected`.
    pub fn apply_page_edit<I>(&self, selected: I)
    where
        I: IntoIterator<Item = RecordId>,
    {
        let event = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            state.selection.apply_page_edit(&state.visible, selected);
            selection_event(state)
        };
        self.events.publish(event);
    }

    /// Select the first `count` records of the dataset. Returns the count
    /// actually applied after clamping to the known total.
    pub fn select_n_logically(&self, count: f64) -> u64 {
        let (applied, event) = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let applied = state
                .selection
                .select_n_logically(count, state.total_records);
            state.selection.sync_logical_target(&state.visible);
            (applied, selection_event(state))
        };
        info!(requested = count, applied, "logical selection applied");
        self.events.publish(event);
        applied
    }

    pub fn clear(&self) {
        let event = {
            let mut state = self.state.lock();
            state.selection.clear();
            selection_event(&state)
        };
        self.events.publish(event);
    }

    pub fn selected_count(&self) -> u64 {
        let state = self.state.lock();
        state.selection.selected_count(state.total_records)
    }

    pub fn is_clear_disabled(&self) -> bool {
        self.state.lock().selection.is_clear_disabled()
    }

    pub fn selection_state(&self) -> SelectionState {
        self.state.lock().selection.state()
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> TableView<S::Record> {
        let state = self.state.lock();
        let total_pages = state.total_pages();
        TableView {
            page: state.visible.clone(),
            checked_ids: state.selection.page_selection_ids(&state.visible),
            current_page: state.current_page,
            total_pages,
            total_records: state.total_records,
            selected_count: state.selection.selected_count(state.total_records),
            entry_range: entry_range(
                state.visible.number,
                state.page_size,
                state.total_records,
            ),
            page_links: visible_pages(state.current_page, total_pages),
            loading: state.loading,
            error: state.error.clone(),
            clear_disabled: state.selection.is_clear_disabled(),
        }
    }
}

fn selection_event<R>(state: &ControllerState<R>) -> CatalogEvent {
    CatalogEvent::SelectionChanged {
        selected_count: state.selection.selected_count(state.total_records),
        state: state.selection.state(),
    }
}
