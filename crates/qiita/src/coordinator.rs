//! Search coordination
//!
//! Turns search submissions, cancellations and retries into fire-and-forget
//! fetch tasks. Each task reports back over the completion channel; only the
//! UI loop that owns the [`ListPresenter`] applies the results.

use std::sync::Arc;

use log::debug;
use qiita_core::avatar::Avatar;
use qiita_core::error::FetchError;
use qiita_core::generation::Generation;
use qiita_core::presenter::ListPresenter;
use qiita_core::qiita::Article;
use tokio::sync::mpsc::UnboundedSender;

use crate::fetcher::ArticleFetcher;

/// Parameters of one article fetch, kept so a failed fetch can be retried
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub count: u32,
    pub title: String,
}

/// Message sent by a finished background task
#[derive(Debug)]
pub enum Completion {
    Articles {
        generation: Generation,
        request: FetchRequest,
        result: Result<Vec<Article>, FetchError>,
    },
    Avatar {
        row: usize,
        token: Generation,
        avatar: Avatar,
    },
}

pub struct SearchCoordinator<F> {
    fetcher: Arc<F>,
    completions: UnboundedSender<Completion>,
    count: u32,
}

impl<F: ArticleFetcher> SearchCoordinator<F> {
    pub fn new(fetcher: Arc<F>, completions: UnboundedSender<Completion>, count: u32) -> Self {
        Self {
            fetcher,
            completions,
            count,
        }
    }

    /// First fetch when the list opens
    pub fn load_initial(&self, presenter: &mut ListPresenter) -> Generation {
        self.on_cancel(presenter)
    }

    /// Search for articles whose title matches `text`.
    pub fn on_submit(&self, presenter: &mut ListPresenter, text: &str) -> Generation {
        self.issue(
            presenter,
            FetchRequest {
                count: self.count,
                title: text.to_string(),
            },
        )
    }

    /// Drop the filter and list everything again.
    pub fn on_cancel(&self, presenter: &mut ListPresenter) -> Generation {
        self.on_submit(presenter, "")
    }

    /// Re-issue a failed fetch with identical parameters.
    pub fn retry(&self, presenter: &mut ListPresenter, request: FetchRequest) -> Generation {
        self.issue(presenter, request)
    }

    /// Spawn one fetch task. Nothing waits on it and nothing cancels it.
    fn issue(&self, presenter: &mut ListPresenter, request: FetchRequest) -> Generation {
        let generation = presenter.begin_fetch();
        debug!(
            "Fetch {generation}: count={} title={:?}",
            request.count, request.title
        );

        let fetcher = Arc::clone(&self.fetcher);
        let completions = self.completions.clone();

        tokio::spawn(async move {
            let result = fetcher
                .fetch_articles(request.count, &request.title)
                .await;

            // The receiver is gone once the UI has shut down
            let _ = completions.send(Completion::Articles {
                generation,
                request,
                result,
            });
        });

        generation
    }
}
