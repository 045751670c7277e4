//! List presenter
//!
//! Owns the article snapshot shown by the list and answers the row queries
//! the view asks. The snapshot is replaced wholesale by accepted fetch results
//! and is never touched by failures.
//!
//! Each fetch and each avatar load carries a [`Generation`] token. Whether an
//! older fetch result may still replace the snapshot is decided by the
//! [`ReplacePolicy`]; avatar results are only accepted for the token the row
//! is currently waiting on.

use crate::avatar::Avatar;
use crate::error::FetchError;
use crate::generation::{Generation, GenerationCounter};
use crate::qiita::{Article, Endpoints, RowContent};

/// How overlapping fetches resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplacePolicy {
    /// Every successful completion replaces the snapshot; the last one to
    /// complete wins regardless of issue order.
    #[default]
    LastCompleted,
    /// Only the most recently issued fetch may replace the snapshot.
    LatestIssued,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PresenterState {
    /// No fetch has succeeded yet.
    #[default]
    Empty,
    Loaded(Vec<Article>),
}

/// Result of handing a fetch completion to the presenter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The snapshot was replaced and now has `rows` rows.
    Installed { rows: usize },
    /// The fetch failed; the snapshot is unchanged.
    Failed(FetchError),
    /// A newer fetch was issued since; the result was dropped.
    Stale,
}

/// Avatar load the view should start for a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarRequest {
    pub row: usize,
    pub token: Generation,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
struct AvatarSlot {
    token: Option<Generation>,
    avatar: Option<Avatar>,
}

#[derive(Debug, Clone)]
pub struct ListPresenter {
    endpoints: Endpoints,
    policy: ReplacePolicy,
    state: PresenterState,
    fetches: GenerationCounter,
    avatar_tokens: GenerationCounter,
    avatars: Vec<AvatarSlot>,
}

impl ListPresenter {
    pub fn new(endpoints: Endpoints, policy: ReplacePolicy) -> Self {
        Self {
            endpoints,
            policy,
            state: PresenterState::Empty,
            fetches: GenerationCounter::new(),
            avatar_tokens: GenerationCounter::new(),
            avatars: Vec::new(),
        }
    }

    pub fn state(&self) -> &PresenterState {
        &self.state
    }

    /// The current snapshot; empty before the first successful fetch.
    pub fn articles(&self) -> &[Article] {
        match &self.state {
            PresenterState::Empty => &[],
            PresenterState::Loaded(articles) => articles,
        }
    }

    /// Register a new fetch and return the token its result must carry.
    pub fn begin_fetch(&mut self) -> Generation {
        self.fetches.issue()
    }

    /// Hand a fetch completion to the presenter.
    pub fn apply_fetch(
        &mut self,
        generation: Generation,
        result: Result<Vec<Article>, FetchError>,
    ) -> FetchOutcome {
        if self.policy == ReplacePolicy::LatestIssued && !self.fetches.is_latest(generation) {
            return FetchOutcome::Stale;
        }

        match result {
            Ok(articles) => {
                let rows = articles.len();
                self.avatars = vec![AvatarSlot::default(); rows];
                self.state = PresenterState::Loaded(articles);
                FetchOutcome::Installed { rows }
            }
            Err(err) => FetchOutcome::Failed(err),
        }
    }

    pub fn row_count(&self) -> usize {
        self.articles().len()
    }

    /// Content of a row, `None` when `index` is outside the snapshot.
    pub fn row_content(&self, index: usize) -> Option<RowContent> {
        self.articles().get(index).map(RowContent::from)
    }

    /// Detail URL to open for a selected row, `None` when `index` is outside
    /// the snapshot.
    pub fn select_row(&self, index: usize) -> Option<String> {
        self.articles()
            .get(index)
            .map(|article| self.endpoints.detail_url(&article.id))
    }

    /// Whether the row has no avatar load issued for the current snapshot.
    pub fn needs_avatar(&self, index: usize) -> bool {
        self.avatars
            .get(index)
            .is_some_and(|slot| slot.token.is_none())
    }

    /// Bind a row to a new avatar load. Any load previously issued for the row
    /// is superseded.
    pub fn bind_row(&mut self, index: usize) -> Option<AvatarRequest> {
        let url = self.articles().get(index)?.user.profile_image_url.clone();
        let token = self.avatar_tokens.issue();
        let slot = self.avatars.get_mut(index)?;
        slot.token = Some(token);

        Some(AvatarRequest {
            row: index,
            token,
            url,
        })
    }

    /// Store a loaded avatar if the row is still waiting for this token.
    ///
    /// Returns whether the avatar was applied.
    pub fn apply_avatar(&mut self, row: usize, token: Generation, avatar: Avatar) -> bool {
        match self.avatars.get_mut(row) {
            Some(slot) if slot.token == Some(token) => {
                slot.avatar = Some(avatar);
                true
            }
            _ => false,
        }
    }

    pub fn avatar(&self, index: usize) -> Option<&Avatar> {
        self.avatars.get(index).and_then(|slot| slot.avatar.as_ref())
    }
}
