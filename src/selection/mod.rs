//! Cross-page row selection.
//!
//! The selection is held as one of three modes, each storing only the rows
//! that disagree with its default:
//! - explicit: nothing selected unless listed
//! - select-all: everything selected unless listed
//! - logical target: the first N records by position, with overrides
//!
//! # Example
//!
//! ```ignore
//! let mut engine = SelectionEngine::new();
//! engine.select_n_logically(20.0, 37);
//!
//! let checked = engine.page_selection(&page);
//! assert_eq!(engine.selected_count(37), 20);
//! ```

mod engine;
mod mode;

pub use engine::SelectionEngine;
pub use mode::{ModeKind, SelectionMode, SelectionState};
