//! Interactive browser state (Model)

use std::ops::Range;

use qiita_core::error::FetchError;
use qiita_core::generation::Generation;
use qiita_core::presenter::ListPresenter;
use qiita_core::search::SearchBar;
use ratatui::widgets::ListState;

use crate::coordinator::FetchRequest;

pub struct App {
    pub presenter: ListPresenter,
    pub search: SearchBar,
    pub selected: usize,
    pub mode: AppMode,
    pub message: Option<String>,
    /// Latest fetch still in flight
    pub pending: Option<Generation>,
    pub list_state: ListState,
    /// Rows drawn by the last render
    pub visible_rows: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Searching,
    Alert(Alert),
}

/// Failed fetch waiting for the user to retry or dismiss it
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub request: FetchRequest,
    pub error: FetchError,
}

/// Side effect requested by a dispatched action, carried out by the runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Quit,
    Search(String),
    CancelSearch,
    Retry(FetchRequest),
    Open(String),
}

impl App {
    pub fn new(presenter: ListPresenter) -> Self {
        Self {
            presenter,
            search: SearchBar::new(),
            selected: 0,
            mode: AppMode::Normal,
            message: None,
            pending: None,
            list_state: ListState::default(),
            visible_rows: 0..0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Rows drawn by the last render, clamped to the current snapshot
    pub fn visible_rows(&self) -> Range<usize> {
        let count = self.presenter.row_count();
        self.visible_rows.start.min(count)..self.visible_rows.end.min(count)
    }
}
