//! Selection engine: reconciles per-row edits with the active mode.

use crate::types::{clamp_count, Keyed, Page, RecordId};
use std::collections::HashSet;
use tracing::debug;

use super::mode::{ModeKind, SelectionMode, SelectionState};

/// Owns the selection for a paginated dataset it never sees in full.
///
/// Every operation works on the currently visible page plus the counters
/// `target` and `total_records`, so cost is bounded by page size.
#[derive(Clone, Debug, Default)]
pub struct SelectionEngine {
    mode: SelectionMode,
}

impl SelectionEngine {
    /// Create an engine in explicit mode with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore an engine from a previously captured state.
    ///
    /// A logical target outside `1..total_records` is normalized the way
    /// `select_n_logically` would have stored it: 0 becomes explicit mode
    /// with the selected overrides kept, and a target covering the whole
    /// dataset becomes select-all with the deselected overrides kept.
    pub fn from_state(state: SelectionState, total_records: u64) -> Self {
        let mode = match SelectionMode::from(state) {
            SelectionMode::Prefix { target: 0, selected, .. } => {
                SelectionMode::Explicit { selected }
            }
            SelectionMode::Prefix {
                target, deselected, ..
            } if target >= total_records => SelectionMode::AllExcept { deselected },
            mode => mode,
        };
        Self { mode }
    }

    pub fn mode(&self) -> &SelectionMode {
        &self.mode
    }

    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    /// Flat snapshot of the current selection.
    pub fn state(&self) -> SelectionState {
        SelectionState::from(&self.mode)
    }

    pub fn logical_target(&self) -> Option<u64> {
        match self.mode {
            SelectionMode::Prefix { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Rows of `page` that should render as checked.
    pub fn page_selection<'a, R: Keyed>(&self, page: &'a Page<R>) -> Vec<&'a R> {
        page.positioned()
            .filter(|(position, row)| self.mode.is_selected(row.key(), *position))
            .map(|(_, row)| row)
            .collect()
    }

    /// Ids of the checked rows on `page`.
    pub fn page_selection_ids<R: Keyed>(&self, page: &Page<R>) -> HashSet<RecordId> {
        self.page_selection(page)
            .into_iter()
            .map(Keyed::key)
            .collect()
    }

    /// Record that the visible page's selection is now exactly
    /// `newly_selected`.
    ///
    /// Only disagreements with the mode's default are stored. Ids not on the
    /// page are ignored, so rows outside `page` are never touched.
    pub fn apply_page_edit<R, I>(&mut self, page: &Page<R>, newly_selected: I)
    where
        R: Keyed,
        I: IntoIterator<Item = RecordId>,
    {
        let selected_now: HashSet<RecordId> = newly_selected.into_iter().collect();

        match &mut self.mode {
            SelectionMode::Explicit { selected } => {
                for row in &page.records {
                    let id = row.key();
                    if selected_now.contains(&id) {
                        selected.insert(id);
                    } else {
                        selected.remove(&id);
                    }
                }
            }
            SelectionMode::AllExcept { deselected } => {
                for row in &page.records {
                    let id = row.key();
                    if selected_now.contains(&id) {
                        deselected.remove(&id);
                    } else {
                        deselected.insert(id);
                    }
                }
            }
            SelectionMode::Prefix {
                target,
                selected,
                deselected,
            } => {
                for (position, row) in page.positioned() {
                    let id = row.key();
                    let is_selected_now = selected_now.contains(&id);

                    if position <= *target {
                        if is_selected_now {
                            deselected.remove(&id);
                        } else {
                            deselected.insert(id);
                        }
                        selected.remove(&id);
                    } else {
                        if is_selected_now {
                            selected.insert(id);
                        } else {
                            selected.remove(&id);
                        }
                        deselected.remove(&id);
                    }
                }
            }
        }
    }

    /// Select the first `count` records of the dataset without enumerating
    /// them. Returns the clamped count actually applied.
    pub fn select_n_logically(&mut self, count: f64, total_records: u64) -> u64 {
        let target = clamp_count(count, total_records);

        if target == 0 {
            debug!(requested = count, "logical select of zero rows, clearing");
            self.clear();
        } else if target == total_records {
            debug!(total_records, "logical select covers every row");
            self.mode = SelectionMode::AllExcept {
                deselected: HashSet::new(),
            };
        } else {
            debug!(target, total_records, "logical target set");
            self.mode = SelectionMode::Prefix {
                target,
                selected: HashSet::new(),
                deselected: HashSet::new(),
            };
        }

        target
    }

    /// Reconcile a freshly loaded page against the logical target.
    ///
    /// For the rows of `page` only, overrides that agree with the position
    /// default are dropped: a deselection recorded for a row past the
    /// target, or a selection recorded for a row inside it. Returns how many
    /// overrides were dropped. No-op outside logical-target mode.
    pub fn sync_logical_target<R: Keyed>(&mut self, page: &Page<R>) -> usize {
        let SelectionMode::Prefix {
            target,
            selected,
            deselected,
        } = &mut self.mode
        else {
            return 0;
        };

        let mut dropped = 0;
        for (position, row) in page.positioned() {
            let id = row.key();
            let stale = if position <= *target {
                selected.remove(&id)
            } else {
                deselected.remove(&id)
            };
            if stale {
                dropped += 1;
            }
        }

        if dropped > 0 {
            debug!(page = page.number, dropped, "dropped stale selection overrides");
        }
        dropped
    }

    /// Reset to explicit mode with nothing selected.
    pub fn clear(&mut self) {
        self.mode = SelectionMode::default();
    }

    /// Number of selected records across the whole dataset.
    pub fn selected_count(&self, total_records: u64) -> u64 {
        match &self.mode {
            SelectionMode::Explicit { selected } => selected.len() as u64,
            SelectionMode::AllExcept { deselected } => {
                total_records.saturating_sub(deselected.len() as u64)
            }
            SelectionMode::Prefix {
                target,
                selected,
                deselected,
            } => {
                let adjusted =
                    i128::from(*target) + selected.len() as i128 - deselected.len() as i128;
                adjusted.clamp(0, i128::from(total_records)) as u64
            }
        }
    }

    /// True when there is nothing to clear.
    pub fn is_clear_disabled(&self) -> bool {
        matches!(&self.mode, SelectionMode::Explicit { selected } if selected.is_empty())
    }
}
