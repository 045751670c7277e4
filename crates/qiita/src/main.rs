use crate::prelude::*;
use clap::Parser;
use std::path::PathBuf;

mod avatar;
mod browser;
mod config;
mod coordinator;
mod error;
mod fetcher;
mod list;
mod prelude;
mod tui;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse and search Qiita articles from the terminal"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Option<SubCommands>,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Qiita host the API and article pages are served from
    #[clap(
        long,
        env = "QIITA_BASE_URL",
        global = true,
        default_value = qiita_core::qiita::DEFAULT_BASE_URL
    )]
    base_url: String,

    /// Articles requested per fetch (1-100)
    #[clap(short = 'n', long, env = "QIITA_COUNT", global = true, default_value_t = qiita_core::qiita::DEFAULT_COUNT)]
    count: u32,

    /// Open article pages under this user's path
    #[clap(long, env = "QIITA_USER_SCOPE", global = true)]
    user_scope: Option<String>,

    /// HTTP timeout in seconds (none by default)
    #[clap(long, env = "QIITA_TIMEOUT", global = true)]
    timeout: Option<u64>,

    /// Which result to keep when searches overlap
    #[clap(long, value_enum, global = true, default_value_t = config::Policy::LastCompleted)]
    policy: config::Policy,

    /// Append logs to this file instead of stderr
    #[clap(long, env = "QIITA_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    /// Whether to display additional information.
    #[clap(long, env = "QIITA_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Browse articles interactively (default)
    Browse,

    /// Print one page of articles
    List(crate::list::ListOptions),

    /// Open an article in the browser
    Open(crate::browser::OpenOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();

    config::init_logging(app.global.log_file.as_deref())?;
    color_eyre::install()?;

    let config = config::QiitaConfig::from_global(&app.global)?;

    match app.command.unwrap_or(SubCommands::Browse) {
        SubCommands::Browse => crate::tui::run(config).await,
        SubCommands::List(options) => crate::list::run(options, config).await,
        SubCommands::Open(options) => crate::browser::run(options, config),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
