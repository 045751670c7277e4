//! Update logic (dispatch)
//!
//! Actions and background completions mutate [`App`] here. Anything that
//! needs I/O is returned as an [`Effect`] for the runtime to carry out.

use log::{debug, error, info};
use qiita_core::generation::Generation;
use qiita_core::presenter::FetchOutcome;

use super::actions::Action;
use super::state::{Alert, App, AppMode, Effect};
use crate::coordinator::Completion;

impl App {
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Quit => return Some(Effect::Quit),
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),
            Action::OpenSelected => return self.presenter.select_row(self.selected).map(Effect::Open),

            Action::StartSearch => {
                self.mode = AppMode::Searching;
                self.search.begin_editing();
            }

            Action::ClearSearch => {
                if self.search.shows_cancel() {
                    self.search.cancel();
                    return Some(Effect::CancelSearch);
                }
            }

            Action::Cancel => match self.mode {
                AppMode::Searching => {
                    self.mode = AppMode::Normal;
                    if self.search.shows_cancel() {
                        self.search.cancel();
                        return Some(Effect::CancelSearch);
                    }
                    self.search.end_editing();
                }
                AppMode::Alert(_) => {
                    self.mode = AppMode::Normal;
                    self.message = None;
                }
                AppMode::Normal => {
                    self.message = None;
                    if self.search.shows_cancel() {
                        self.search.cancel();
                        return Some(Effect::CancelSearch);
                    }
                }
            },

            Action::Submit => match std::mem::replace(&mut self.mode, AppMode::Normal) {
                AppMode::Searching => return Some(Effect::Search(self.search.submit())),
                AppMode::Alert(alert) => return Some(Effect::Retry(alert.request)),
                AppMode::Normal => {}
            },

            Action::Input(c) => {
                if self.mode == AppMode::Searching {
                    self.search.push(c);
                }
            }

            Action::DeleteChar => {
                if self.mode == AppMode::Searching {
                    self.search.pop();
                }
            }
        }
        None
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.presenter.row_count() {
            self.selected += 1;
        }
    }

    /// Record a fetch that was just issued.
    pub fn fetch_started(&mut self, generation: Generation) {
        self.pending = Some(generation);
        self.message = Some("Loading...".to_string());
    }

    /// Apply a message from a background task.
    pub fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Articles {
                generation,
                request,
                result,
            } => {
                if self.pending == Some(generation) {
                    self.pending = None;
                }

                match self.presenter.apply_fetch(generation, result) {
                    FetchOutcome::Installed { rows } => {
                        info!("Fetch {generation}: {rows} articles");
                        self.selected = 0;
                        self.list_state = Default::default();
                        self.message = Some(format!("{rows} articles"));
                    }
                    FetchOutcome::Failed(err) => {
                        error!("Fetch {generation} failed: {err}");
                        self.search.end_editing();
                        self.message = None;
                        self.mode = AppMode::Alert(Alert {
                            request,
                            error: err,
                        });
                    }
                    FetchOutcome::Stale => debug!("Fetch {generation} superseded, dropped"),
                }
            }
            Completion::Avatar { row, token, avatar } => {
                if !self.presenter.apply_avatar(row, token, avatar) {
                    debug!("Avatar {token} for row {row} superseded, dropped");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qiita_core::avatar::Avatar;
    use qiita_core::error::FetchError;
    use qiita_core::presenter::{ListPresenter, ReplacePolicy};
    use qiita_core::qiita::{Article, Endpoints};

    use crate::coordinator::tests::article;
    use crate::coordinator::FetchRequest;

    fn request(title: &str) -> FetchRequest {
        FetchRequest {
            count: 50,
            title: title.to_string(),
        }
    }

    fn app() -> App {
        App::new(ListPresenter::new(
            Endpoints::default(),
            ReplacePolicy::LatestIssued,
        ))
    }

    fn complete(app: &mut App, title: &str, result: Result<Vec<Article>, FetchError>) {
        let generation = app.presenter.begin_fetch();
        app.fetch_started(generation);
        app.apply_completion(Completion::Articles {
            generation,
            request: request(title),
            result,
        });
    }

    fn loaded_app(count: usize) -> App {
        let mut app = app();
        let articles = (0..count)
            .map(|i| article(&format!("id{i}"), &format!("Title {i}")))
            .collect();
        complete(&mut app, "", Ok(articles));
        app
    }

    fn type_text(app: &mut App, text: &str) {
        app.dispatch(Action::StartSearch);
        for c in text.chars() {
            app.dispatch(Action::Input(c));
        }
    }

    #[test]
    fn test_quit() {
        assert_eq!(app().dispatch(Action::Quit), Some(Effect::Quit));
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = loaded_app(2);

        app.dispatch(Action::MoveSelectionUp);
        assert_eq!(app.selected, 0);

        app.dispatch(Action::MoveSelectionDown);
        app.dispatch(Action::MoveSelectionDown);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_open_selected() {
        let mut app = loaded_app(3);
        app.dispatch(Action::MoveSelectionDown);

        assert_eq!(
            app.dispatch(Action::OpenSelected),
            Some(Effect::Open("https://qiita.com/items/id1".to_string()))
        );
    }

    #[test]
    fn test_open_on_empty_list_does_nothing() {
        assert_eq!(app().dispatch(Action::OpenSelected), None);
    }

    #[test]
    fn test_submit_search() {
        let mut app = loaded_app(1);
        type_text(&mut app, "rust");

        assert_eq!(app.mode, AppMode::Searching);
        assert_eq!(
            app.dispatch(Action::Submit),
            Some(Effect::Search("rust".to_string()))
        );
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.search.text(), "rust");
    }

    #[test]
    fn test_letters_ignored_outside_search() {
        let mut app = loaded_app(1);
        app.dispatch(Action::Input('x'));
        assert_eq!(app.search.text(), "");
    }

    #[test]
    fn test_cancel_with_text_refetches() {
        let mut app = loaded_app(1);
        type_text(&mut app, "rust");

        assert_eq!(app.dispatch(Action::Cancel), Some(Effect::CancelSearch));
        assert_eq!(app.search.text(), "");
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_cancel_without_text_only_stops_editing() {
        let mut app = loaded_app(1);
        app.dispatch(Action::StartSearch);

        assert_eq!(app.dispatch(Action::Cancel), None);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(!app.search.is_editing());
    }

    #[test]
    fn test_esc_after_submit_cancels_search() {
        let mut app = loaded_app(1);
        type_text(&mut app, "r");
        app.dispatch(Action::Submit);

        let action = crate::tui::input::get_action(&app.mode, crossterm::event::KeyCode::Esc);
        assert_eq!(action, Some(Action::Cancel));
        assert_eq!(app.dispatch(Action::Cancel), Some(Effect::CancelSearch));
        assert_eq!(app.search.text(), "");
        assert!(!app.search.shows_cancel());
    }

    #[test]
    fn test_esc_in_normal_mode_without_text_does_nothing() {
        let mut app = loaded_app(1);
        assert_eq!(app.dispatch(Action::Cancel), None);
    }

    #[test]
    fn test_clear_search_from_normal_mode() {
        let mut app = loaded_app(1);
        assert_eq!(app.dispatch(Action::ClearSearch), None);

        type_text(&mut app, "go");
        app.dispatch(Action::Submit);
        assert_eq!(app.dispatch(Action::ClearSearch), Some(Effect::CancelSearch));
        assert_eq!(app.search.text(), "");
    }

    #[test]
    fn test_installed_resets_selection() {
        let mut app = loaded_app(3);
        app.dispatch(Action::MoveSelectionDown);

        complete(&mut app, "", Ok(vec![article("x", "X")]));

        assert_eq!(app.selected, 0);
        assert_eq!(app.presenter.row_count(), 1);
        assert!(!app.is_loading());
        assert_eq!(app.message.as_deref(), Some("1 articles"));
    }

    #[test]
    fn test_failure_raises_alert_and_keeps_rows() {
        let mut app = loaded_app(2);
        complete(&mut app, "rust", Err(FetchError::Network("dns".to_string())));

        assert_eq!(app.presenter.row_count(), 2);
        assert_eq!(
            app.mode,
            AppMode::Alert(Alert {
                request: request("rust"),
                error: FetchError::Network("dns".to_string()),
            })
        );
        assert!(!app.is_loading());
    }

    #[test]
    fn test_alert_retry_returns_same_request() {
        let mut app = loaded_app(0);
        complete(&mut app, "rust", Err(FetchError::Status(500)));

        assert_eq!(
            app.dispatch(Action::Submit),
            Some(Effect::Retry(request("rust")))
        );
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_alert_dismiss() {
        let mut app = loaded_app(0);
        complete(&mut app, "", Err(FetchError::Decode("eof".to_string())));

        assert_eq!(app.dispatch(Action::Cancel), None);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_stale_failure_raises_no_alert() {
        let mut app = loaded_app(1);
        let old = app.presenter.begin_fetch();
        let new = app.presenter.begin_fetch();
        app.fetch_started(new);

        app.apply_completion(Completion::Articles {
            generation: old,
            request: request("old"),
            result: Err(FetchError::Status(500)),
        });

        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.is_loading());
    }

    #[test]
    fn test_avatar_completion() {
        let mut app = loaded_app(1);
        let avatar_request = app.presenter.bind_row(0).unwrap();

        app.apply_completion(Completion::Avatar {
            row: 0,
            token: avatar_request.token,
            avatar: Avatar::placeholder(),
        });

        assert!(app.presenter.avatar(0).is_some());
    }

    #[test]
    fn test_visible_rows_clamped_to_snapshot() {
        let mut app = loaded_app(2);
        app.visible_rows = 0..10;
        assert_eq!(app.visible_rows(), 0..2);
    }
}
