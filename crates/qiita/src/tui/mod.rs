//! Interactive article browser
//!
//! Laid out as Model / Intent / Update / View:
//!
//! - [`state`]: what is on screen ([`App`])
//! - [`actions`]: what the user asked for ([`actions::Action`])
//! - [`input`]: key events to actions
//! - [`logic`]: actions and completions applied to the state
//! - [`view`]: the state drawn with `ratatui`
//!
//! The [`Runtime`] owns the state. Fetch and avatar tasks run on the tokio
//! runtime and only ever talk back through the completion channel, so every
//! mutation of the list happens on the loop that draws it.

pub mod actions;
pub mod input;
pub mod logic;
pub mod state;
pub mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use qiita_core::presenter::ListPresenter;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::avatar::AvatarLoader;
use crate::browser::{Opener, SystemBrowser};
use crate::config::QiitaConfig;
use crate::coordinator::{Completion, SearchCoordinator};
use crate::fetcher::{ArticleFetcher, ImageFetcher, QiitaClient};
use crate::prelude::*;

pub use state::{App, Effect};

const TICK_RATE: Duration = Duration::from_millis(100);

pub struct Runtime<F, I, O> {
    pub app: App,
    coordinator: SearchCoordinator<F>,
    avatars: AvatarLoader<I>,
    opener: O,
    completions: UnboundedReceiver<Completion>,
}

impl<F: ArticleFetcher, I: ImageFetcher, O: Opener> Runtime<F, I, O> {
    pub fn new(app: App, fetcher: Arc<F>, images: Arc<I>, opener: O, count: u32) -> Self {
        let (tx, completions) = mpsc::unbounded_channel();

        Self {
            app,
            coordinator: SearchCoordinator::new(fetcher, tx.clone(), count),
            avatars: AvatarLoader::new(images, tx),
            opener,
            completions,
        }
    }

    /// Issue the first unfiltered fetch.
    pub fn start(&mut self) {
        let generation = self.coordinator.load_initial(&mut self.app.presenter);
        self.app.fetch_started(generation);
    }

    /// Carry out an effect. Returns `true` when the browser should exit.
    pub fn handle_effect(&mut self, effect: Effect) -> bool {
        let generation = match effect {
            Effect::Quit => return true,
            Effect::Search(text) => self.coordinator.on_submit(&mut self.app.presenter, &text),
            Effect::CancelSearch => self.coordinator.on_cancel(&mut self.app.presenter),
            Effect::Retry(request) => self.coordinator.retry(&mut self.app.presenter, request),
            Effect::Open(url) => {
                match self.opener.open(&url) {
                    Ok(()) => self.app.message = Some(f!("Opened {url}")),
                    Err(err) => {
                        error!("{err:?}");
                        self.app.message = Some(err.to_string());
                    }
                }
                return false;
            }
        };

        self.app.fetch_started(generation);
        false
    }

    /// Apply every completion that has already arrived.
    pub fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions.try_recv() {
            self.app.apply_completion(completion);
        }
    }

    /// Wait for the next completion and apply it.
    pub async fn recv_completion(&mut self) -> bool {
        match self.completions.recv().await {
            Some(completion) => {
                self.app.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    /// Start avatar loads for drawn rows that have neither an avatar nor a
    /// load in flight.
    pub fn bind_visible_avatars(&mut self) {
        for row in self.app.visible_rows() {
            if !self.app.presenter.needs_avatar(row) {
                continue;
            }
            if let Some(request) = self.app.presenter.bind_row(row) {
                self.avatars.load(request);
            }
        }
    }

    /// Map a key press to an action and run it. Returns `true` on quit.
    pub fn handle_key(&mut self, key: event::KeyCode) -> bool {
        let Some(action) = input::get_action(&self.app.mode, key) else {
            return false;
        };

        match self.app.dispatch(action) {
            Some(effect) => self.handle_effect(effect),
            None => false,
        }
    }
}

/// `qiita browse` entry point
pub async fn run(config: QiitaConfig) -> Result<()> {
    let client = Arc::new(QiitaClient::from_config(&config)?);
    let app = App::new(ListPresenter::new(config.endpoints.clone(), config.policy));
    let mut runtime = Runtime::new(app, Arc::clone(&client), client, SystemBrowser, config.count);

    info!(
        "Browsing {} (count={}, policy={:?})",
        config.endpoints.base_url(),
        config.count,
        config.policy
    );

    enable_raw_mode().map_err(Error::Terminal)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(Error::Terminal)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(Error::Terminal)?;

    let result = run_app(&mut terminal, &mut runtime);

    disable_raw_mode().map_err(Error::Terminal)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(Error::Terminal)?;
    terminal.show_cursor().map_err(Error::Terminal)?;

    result.map_err(|e| Error::Terminal(e).into())
}

fn run_app<F, I, O>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    runtime: &mut Runtime<F, I, O>,
) -> io::Result<()>
where
    F: ArticleFetcher,
    I: ImageFetcher,
    O: Opener,
{
    runtime.start();

    loop {
        runtime.drain_completions();
        terminal.draw(|frame| view::render(frame, &mut runtime.app))?;
        runtime.bind_visible_avatars();

        if !event::poll(TICK_RATE)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && runtime.handle_key(key.code) {
                break;
            }
        }
    }

    Ok(())
}
