//! End-to-end selection scenarios through the page controller.

use artwork_catalog::{
    CatalogEvent, EventFilter, LoadOutcome, MemoryPageSource, ModeKind, PageController, PageData,
    PageSource, RecordId, Result, SubscriptionConfig,
};
use parking_lot::Mutex;

const TOTAL: u64 = 37;
const PAGE_SIZE: u32 = 12;

/// Controller over 37 records whose ids equal their positions.
async fn loaded_controller() -> PageController<MemoryPageSource<RecordId>> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let source = MemoryPageSource::new((1..=TOTAL).map(RecordId).collect(), PAGE_SIZE);
    let controller = PageController::with_page_size(source, PAGE_SIZE);
    assert_eq!(controller.load_current().await, LoadOutcome::Loaded);
    controller
}

fn checked(controller: &PageController<MemoryPageSource<RecordId>>) -> Vec<u64> {
    let mut ids: Vec<u64> = controller.page_selection().iter().map(|id| id.0).collect();
    ids.sort_unstable();
    ids
}

// --- Logical Selection ---

#[tokio::test]
async fn test_select_twenty_of_thirty_seven() {
    let controller = loaded_controller().await;

    assert_eq!(controller.select_n_logically(20.0), 20);
    assert_eq!(controller.selected_count(), 20);
    assert_eq!(checked(&controller), (1..=12).collect::<Vec<_>>());

    controller.change_page(2).await;
    assert_eq!(checked(&controller), (13..=20).collect::<Vec<_>>());

    controller.change_page(3).await;
    assert!(checked(&controller).is_empty());
    assert_eq!(controller.selected_count(), 20);
}

#[tokio::test]
async fn test_select_all_then_uncheck_one() {
    let controller = loaded_controller().await;

    assert_eq!(controller.select_n_logically(37.0), 37);
    assert_eq!(controller.selection_state().kind(), ModeKind::SelectAll);

    let keep: Vec<RecordId> = controller
        .page_selection()
        .into_iter()
        .filter(|id| id.0 != 5)
        .collect();
    controller.apply_page_edit(keep);

    assert_eq!(controller.selected_count(), 36);
    let state = controller.selection_state();
    assert_eq!(state.deselected_ids, [RecordId(5)].into_iter().collect());
}

#[tokio::test]
async fn test_check_row_past_target() {
    let controller = loaded_controller().await;
    controller.select_n_logically(20.0);
    controller.change_page(2).await;

    let mut now = controller.page_selection();
    now.push(RecordId(23));
    controller.apply_page_edit(now);

    assert!(controller.selection_state().selected_ids.contains(&RecordId(23)));
    assert_eq!(controller.selected_count(), 21);
}

#[tokio::test]
async fn test_edits_survive_page_round_trip() {
    let controller = loaded_controller().await;
    controller.select_n_logically(20.0);

    // Uncheck 3 on page 1, check 23 on page 2.
    let keep: Vec<RecordId> = controller
        .page_selection()
        .into_iter()
        .filter(|id| id.0 != 3)
        .collect();
    controller.apply_page_edit(keep);

    controller.change_page(2).await;
    let mut now = controller.page_selection();
    now.push(RecordId(23));
    controller.apply_page_edit(now);

    controller.change_page(1).await;
    assert!(!checked(&controller).contains(&3));
    assert_eq!(checked(&controller).len(), 11);

    controller.change_page(2).await;
    assert!(checked(&controller).contains(&23));
    assert_eq!(controller.selected_count(), 20);
}

#[tokio::test]
async fn test_select_zero_and_clear() {
    let controller = loaded_controller().await;
    controller.apply_page_edit([RecordId(1), RecordId(2)]);
    assert!(!controller.is_clear_disabled());

    assert_eq!(controller.select_n_logically(0.0), 0);
    assert_eq!(controller.selected_count(), 0);
    assert!(controller.is_clear_disabled());

    controller.select_n_logically(10.0);
    controller.clear();
    controller.clear();
    assert_eq!(controller.selected_count(), 0);
    assert_eq!(controller.selection_state().kind(), ModeKind::Explicit);
}

#[tokio::test]
async fn test_explicit_selection_across_pages() {
    let controller = loaded_controller().await;
    controller.apply_page_edit([RecordId(1), RecordId(12)]);

    controller.change_page(4).await;
    controller.apply_page_edit([RecordId(37)]);

    assert_eq!(controller.selected_count(), 3);
    controller.change_page(1).await;
    assert_eq!(checked(&controller), vec![1, 12]);
}

// --- Reconcile On Load ---

/// Source whose record order can change between fetches.
struct ReorderingSource {
    records: Mutex<Vec<RecordId>>,
    page_size: u32,
}

impl ReorderingSource {
    fn new(ids: &[u64], page_size: u32) -> Self {
        Self {
            records: Mutex::new(ids.iter().copied().map(RecordId).collect()),
            page_size,
        }
    }

    fn reorder(&self, ids: &[u64]) {
        *self.records.lock() = ids.iter().copied().map(RecordId).collect();
    }
}

impl PageSource for ReorderingSource {
    type Record = RecordId;

    async fn fetch_page(&self, page: u32) -> Result<PageData<RecordId>> {
        let records = self.records.lock();
        let size = self.page_size as usize;
        let start = (page.max(1) as usize - 1) * size;
        Ok(PageData {
            records: records.iter().skip(start).take(size).copied().collect(),
            total_records: records.len() as u64,
            page_size: self.page_size,
        })
    }
}

#[tokio::test]
async fn test_load_drops_override_made_stale_by_reorder() {
    let source = ReorderingSource::new(&[1, 2, 3, 4, 5, 6, 7, 8], 4);
    let controller = PageController::with_page_size(source, 4);
    controller.load_current().await;

    assert_eq!(controller.select_n_logically(4.0), 4);
    // Uncheck id 3 while it sits at position 3, inside the target.
    controller.apply_page_edit([RecordId(1), RecordId(2), RecordId(4)]);
    assert_eq!(controller.selected_count(), 3);

    let handle = controller.events().subscribe(SubscriptionConfig::default());

    // Id 3 moves to position 5, past the target.
    controller.source().reorder(&[1, 2, 4, 8, 3, 5, 6, 7]);
    assert_eq!(controller.change_page(2).await, LoadOutcome::Loaded);

    let state = controller.selection_state();
    assert!(state.deselected_ids.is_empty());
    assert_eq!(state.logical_target_count, Some(4));
    assert_eq!(controller.selected_count(), 4);
    assert!(controller.page_selection().is_empty());

    let events = handle.drain();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], CatalogEvent::PageLoaded { page: 2, .. }));
    match &events[1] {
        CatalogEvent::SelectionChanged {
            selected_count,
            state,
        } => {
            assert_eq!(*selected_count, 4);
            assert!(state.deselected_ids.is_empty());
        }
        other => panic!("Expected SelectionChanged, got {:?}", other),
    }
}

#[tokio::test]
async fn test_load_without_reorder_keeps_overrides() {
    let source = ReorderingSource::new(&[1, 2, 3, 4, 5, 6, 7, 8], 4);
    let controller = PageController::with_page_size(source, 4);
    controller.load_current().await;
    controller.select_n_logically(4.0);
    controller.apply_page_edit([RecordId(1), RecordId(2), RecordId(4)]);

    let handle = controller.events().subscribe(SubscriptionConfig {
        filter: EventFilter::selection(),
        ..Default::default()
    });
    controller.change_page(2).await;
    controller.change_page(1).await;

    assert_eq!(
        controller.selection_state().deselected_ids,
        [RecordId(3)].into_iter().collect()
    );
    assert_eq!(controller.selected_count(), 3);
    assert!(handle.drain().is_empty());
}

// --- Events ---

#[tokio::test]
async fn test_selection_events_published() {
    let controller = loaded_controller().await;
    let handle = controller.events().subscribe(SubscriptionConfig {
        filter: EventFilter::selection(),
        ..Default::default()
    });

    controller.select_n_logically(20.0);
    controller.clear();

    let events = handle.drain();
    assert_eq!(events.len(), 2);
    match &events[0] {
        CatalogEvent::SelectionChanged {
            selected_count,
            state,
        } => {
            assert_eq!(*selected_count, 20);
            assert_eq!(state.logical_target_count, Some(20));
        }
        other => panic!("Expected SelectionChanged, got {:?}", other),
    }
    assert!(matches!(
        events[1],
        CatalogEvent::SelectionChanged {
            selected_count: 0,
            ..
        }
    ));
}

#[tokio::test]
async fn test_page_loaded_event_carries_checked_rows() {
    let controller = loaded_controller().await;
    controller.select_n_logically(20.0);
    let handle = controller.events().subscribe(SubscriptionConfig {
        filter: EventFilter::pages(),
        ..Default::default()
    });

    controller.change_page(2).await;

    match handle.try_recv().unwrap() {
        CatalogEvent::PageLoaded {
            page,
            row_ids,
            checked_ids,
            total_records,
            ..
        } => {
            assert_eq!(page, 2);
            assert_eq!(total_records, TOTAL);
            assert_eq!(row_ids.len(), 12);
            assert_eq!(checked_ids, (13..=20).map(RecordId).collect::<Vec<_>>());
        }
        other => panic!("Expected PageLoaded, got {:?}", other),
    }
}
