//! Search bar text state
//!
//! Tracks the typed query and whether the bar is being edited. Submitting or
//! cancelling returns the filter the caller should fetch with.

pub const SEARCH_PLACEHOLDER: &str = "Search";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchBar {
    text: String,
    editing: bool,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// The cancel action is only offered while there is text to clear.
    pub fn shows_cancel(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn begin_editing(&mut self) {
        self.editing = true;
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn pop(&mut self) {
        self.text.pop();
    }

    /// Stop editing without searching.
    pub fn end_editing(&mut self) {
        self.editing = false;
    }

    /// Stop editing and return the filter to search with.
    pub fn submit(&mut self) -> String {
        self.editing = false;
        self.text.clone()
    }

    /// Clear the text, stop editing and return the empty filter.
    pub fn cancel(&mut self) -> String {
        self.text.clear();
        self.editing = false;
        String::new()
    }
}
