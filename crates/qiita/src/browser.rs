use crate::prelude::{println, *};
use log::info;

/// Opens article pages outside the terminal
pub trait Opener {
    fn open(&self, url: &str) -> Result<()>;
}

/// The default system browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Opener for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        info!("Opening {url}");
        webbrowser::open(url).map_err(|e| {
            Error::Browser {
                url: url.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[derive(Debug, clap::Args, Clone)]
pub struct OpenOptions {
    /// Article id or full URL (e.g., "c686397e4a0f4f11683d" or "https://qiita.com/someone/items/c686397e4a0f4f11683d")
    pub item: String,

    /// Print the URL instead of opening it
    #[arg(long)]
    pub print: bool,
}

/// `qiita open` entry point
pub fn run(options: OpenOptions, config: crate::config::QiitaConfig) -> Result<()> {
    let url = resolve_detail_url(&options.item, &config)?;

    if options.print {
        println!("{url}");
        return Ok(());
    }

    SystemBrowser.open(&url)
}

fn resolve_detail_url(item: &str, config: &crate::config::QiitaConfig) -> Result<String> {
    let id = qiita_core::qiita::extract_article_id(item)
        .ok_or_else(|| Error::InvalidArticle(item.to_string()))?;

    Ok(config.endpoints.detail_url(&id))
}
