#[derive(thiserror::Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to open {url} in the browser: {reason}")]
    Browser { url: String, reason: String },

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Not a Qiita article id or URL: {0}")]
    InvalidArticle(String),
}
