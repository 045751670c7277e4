use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Default Qiita host.
pub const DEFAULT_BASE_URL: &str = "https://qiita.com";

/// Number of articles requested when nothing else is configured.
pub const DEFAULT_COUNT: u32 = 50;

/// Article author as returned by the items endpoint
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub profile_image_url: String,
}

/// Article as returned by the items endpoint
///
/// Only the fields the reader needs are decoded; everything else in the
/// response is ignored.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub user: User,
}

/// What a single list row shows
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RowContent {
    pub title: String,
    pub author_id: String,
    pub avatar_url: String,
}

impl From<&Article> for RowContent {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            author_id: article.user.id.clone(),
            avatar_url: article.user.profile_image_url.clone(),
        }
    }
}

/// Host and path layout of the Qiita site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    user_scope: Option<String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            user_scope: None,
        }
    }

    /// Builds detail URLs under `<base>/<user>/items/<id>` instead of
    /// `<base>/items/<id>`.
    pub fn with_user_scope(mut self, user: Option<String>) -> Self {
        self.user_scope = user.filter(|u| !u.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the items search URL.
    ///
    /// The page is always 1 and `count` is sent as the page size unchanged.
    /// The `title:` query term is always present; an empty filter matches
    /// every article.
    pub fn items_url(&self, count: u32, title_filter: &str) -> Result<String, FetchError> {
        if count == 0 {
            return Err(FetchError::InvalidCount(count));
        }

        Ok(format!(
            "{}/api/v2/items?page=1&per_page={count}&query=title:{}",
            self.base_url,
            urlencoding::encode(title_filter)
        ))
    }

    /// URL of the article page opened in the browser
    pub fn detail_url(&self, article_id: &str) -> String {
        match &self.user_scope {
            Some(user) => format!("{}/{user}/items/{article_id}", self.base_url),
            None => format!("{}/items/{article_id}", self.base_url),
        }
    }
}

/// Individual list item output
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub avatar_url: String,
    pub url: String,
}

/// Complete output of a non-interactive listing
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ListOutput {
    pub query: String,
    pub count: u32,
    pub items: Vec<ListItem>,
}

/// Transform decoded articles into list output with detail URLs
pub fn transform_articles(
    articles: &[Article],
    endpoints: &Endpoints,
    query: &str,
    count: u32,
) -> ListOutput {
    let items = articles
        .iter()
        .map(|article| ListItem {
            id: article.id.clone(),
            title: article.title.clone(),
            author: article.user.id.clone(),
            avatar_url: article.user.profile_image_url.clone(),
            url: endpoints.detail_url(&article.id),
        })
        .collect();

    ListOutput {
        query: query.to_string(),
        count,
        items,
    }
}

/// Decode the items endpoint response body.
///
/// Fails as a whole on any missing or mistyped required field; no partially
/// filled `Article` is ever produced.
pub fn decode_articles(body: &[u8]) -> Result<Vec<Article>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

/// Extract an article id from a raw id or any Qiita article URL.
///
/// Accepts `abc123`, `https://qiita.com/items/abc123` and
/// `https://qiita.com/someone/items/abc123?utm=x`.
pub fn extract_article_id(input: &str) -> Option<String> {
    let input = input.trim();
    let path = match input.split_once("/items/") {
        Some((_, rest)) => rest,
        None if !input.contains('/') => input,
        None => return None,
    };

    let id: String = path
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
