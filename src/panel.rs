//! State of the "select N rows" panel.

use crate::controller::PageController;
use crate::source::PageSource;

/// Parse the panel's raw input into a requested count.
///
/// Empty input means 0. Anything unparsable yields NaN, which the selection
/// engine clamps to 0.
pub fn parse_count_input(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Open/closed flag and the text typed into the count input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectNPanel {
    open: bool,
    input: String,
}

impl SelectNPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Clear the input and close the panel.
    pub fn reset(&mut self) {
        self.input.clear();
        self.open = false;
    }

    /// Apply the typed count through `controller`, then reset the panel.
    /// Returns the count actually selected.
    pub fn submit<S: PageSource>(&mut self, controller: &PageController<S>) -> u64 {
        let applied = controller.select_n_logically(parse_count_input(&self.input));
        self.reset();
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryPageSource;
    use crate::types::RecordId;

    #[test]
    fn test_parse_count_input() {
        assert_eq!(parse_count_input(""), 0.0);
        assert_eq!(parse_count_input("  "), 0.0);
        assert_eq!(parse_count_input("20"), 20.0);
        assert_eq!(parse_count_input(" 7.5 "), 7.5);
        assert!(parse_count_input("abc").is_nan());
    }

    #[tokio::test]
    async fn test_submit_applies_and_resets() {
        let source = MemoryPageSource::new((1..=37).map(RecordId).collect(), 12);
        let controller = PageController::with_page_size(source, 12);
        controller.load_current().await;

        let mut panel = SelectNPanel::new();
        panel.toggle();
        panel.set_input("500");
        assert!(panel.is_open());

        assert_eq!(panel.submit(&controller), 37);
        assert!(!panel.is_open());
        assert_eq!(panel.input(), "");
        assert_eq!(controller.selected_count(), 37);

        panel.set_input("oops");
        assert_eq!(panel.submit(&controller), 0);
        assert!(controller.is_clear_disabled());
    }
}
