//! Selection modes and the flat state view exposed to callers.

use crate::types::RecordId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// How the current selection is represented.
///
/// Each variant stores only what disagrees with its implicit default, so
/// memory is bounded by the rows a user has actually touched rather than by
/// the size of the remote dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    /// Nothing is selected unless listed.
    Explicit { selected: HashSet<RecordId> },

    /// Everything is selected unless listed.
    AllExcept { deselected: HashSet<RecordId> },

    /// The first `target` records of the remote order are selected.
    ///
    /// `deselected` holds rows inside the prefix the user unchecked,
    /// `selected` holds rows past the prefix the user checked.
    Prefix {
        target: u64,
        selected: HashSet<RecordId>,
        deselected: HashSet<RecordId>,
    },
}

impl Default for SelectionMode {
    fn default() -> Self {
        SelectionMode::Explicit {
            selected: HashSet::new(),
        }
    }
}

impl SelectionMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            SelectionMode::Explicit { .. } => ModeKind::Explicit,
            SelectionMode::AllExcept { .. } => ModeKind::SelectAll,
            SelectionMode::Prefix { .. } => ModeKind::LogicalTarget,
        }
    }

    /// Whether a row at 1-based `position` is selected by default, before
    /// any per-row override is considered.
    pub fn default_selected(&self, position: u64) -> bool {
        match self {
            SelectionMode::Explicit { .. } => false,
            SelectionMode::AllExcept { .. } => true,
            SelectionMode::Prefix { target, .. } => position <= *target,
        }
    }

    /// Resolve the selection status of one row.
    pub fn is_selected(&self, id: RecordId, position: u64) -> bool {
        match self {
            SelectionMode::Explicit { selected } => selected.contains(&id),
            SelectionMode::AllExcept { deselected } => !deselected.contains(&id),
            SelectionMode::Prefix {
                target,
                selected,
                deselected,
            } => {
                if position <= *target {
                    !deselected.contains(&id)
                } else {
                    selected.contains(&id)
                }
            }
        }
    }
}

/// Which of the three modes is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    Explicit,
    SelectAll,
    LogicalTarget,
}

/// Flat snapshot of the selection, in the shape the presentation layer and
/// event subscribers consume.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_ids: BTreeSet<RecordId>,
    pub deselected_ids: BTreeSet<RecordId>,
    pub is_select_all_active: bool,
    pub logical_target_count: Option<u64>,
}

impl SelectionState {
    pub fn kind(&self) -> ModeKind {
        match (self.logical_target_count, self.is_select_all_active) {
            (Some(_), _) => ModeKind::LogicalTarget,
            (None, true) => ModeKind::SelectAll,
            (None, false) => ModeKind::Explicit,
        }
    }
}

impl From<&SelectionMode> for SelectionState {
    fn from(mode: &SelectionMode) -> Self {
        match mode {
            SelectionMode::Explicit { selected } => SelectionState {
                selected_ids: selected.iter().copied().collect(),
                ..Default::default()
            },
            SelectionMode::AllExcept { deselected } => SelectionState {
                deselected_ids: deselected.iter().copied().collect(),
                is_select_all_active: true,
                ..Default::default()
            },
            SelectionMode::Prefix {
                target,
                selected,
                deselected,
            } => SelectionState {
                selected_ids: selected.iter().copied().collect(),
                deselected_ids: deselected.iter().copied().collect(),
                is_select_all_active: true,
                logical_target_count: Some(*target),
            },
        }
    }
}

/// Rebuild a mode from a flat state, dropping the sets the resulting mode
/// does not use.
impl From<SelectionState> for SelectionMode {
    fn from(state: SelectionState) -> Self {
        match state.kind() {
            ModeKind::LogicalTarget => SelectionMode::Prefix {
                target: state.logical_target_count.unwrap_or(0),
                selected: state.selected_ids.into_iter().collect(),
                deselected: state.deselected_ids.into_iter().collect(),
            },
            ModeKind::SelectAll => SelectionMode::AllExcept {
                deselected: state.deselected_ids.into_iter().collect(),
            },
            ModeKind::Explicit => SelectionMode::Explicit {
                selected: state.selected_ids.into_iter().collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> HashSet<RecordId> {
        raw.iter().copied().map(RecordId).collect()
    }

    #[test]
    fn test_prefix_resolution() {
        let mode = SelectionMode::Prefix {
            target: 20,
            selected: ids(&[23]),
            deselected: ids(&[5]),
        };

        assert!(mode.is_selected(RecordId(1), 1));
        assert!(!mode.is_selected(RecordId(5), 5));
        assert!(mode.is_selected(RecordId(20), 20));
        assert!(!mode.is_selected(RecordId(21), 21));
        assert!(mode.is_selected(RecordId(23), 23));
    }

    #[test]
    fn test_state_round_trip_drops_unused_sets() {
        let state = SelectionState {
            selected_ids: [RecordId(1)].into_iter().collect(),
            deselected_ids: [RecordId(2)].into_iter().collect(),
            is_select_all_active: false,
            logical_target_count: None,
        };

        let mode = SelectionMode::from(state);
        assert_eq!(mode, SelectionMode::Explicit { selected: ids(&[1]) });

        let back = SelectionState::from(&mode);
        assert!(back.deselected_ids.is_empty());
        assert_eq!(back.kind(), ModeKind::Explicit);
    }

    #[test]
    fn test_state_serializes_flat_fields() {
        let mode = SelectionMode::Prefix {
            target: 20,
            selected: HashSet::new(),
            deselected: ids(&[5]),
        };
        let json = serde_json::to_value(SelectionState::from(&mode)).unwrap();
        assert_eq!(json["is_select_all_active"], true);
        assert_eq!(json["logical_target_count"], 20);
        assert_eq!(json["deselected_ids"], serde_json::json!([5]));
    }
}
