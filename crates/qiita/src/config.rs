use crate::prelude::*;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::Duration;

use qiita_core::presenter::ReplacePolicy;
use qiita_core::qiita::Endpoints;

/// How overlapping searches resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Policy {
    /// Show whichever search finishes last
    #[default]
    LastCompleted,
    /// Show only the result of the most recent search
    LatestIssued,
}

impl From<Policy> for ReplacePolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::LatestIssued => ReplacePolicy::LatestIssued,
            Policy::LastCompleted => ReplacePolicy::LastCompleted,
        }
    }
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct QiitaConfig {
    pub endpoints: Endpoints,
    pub count: u32,
    pub timeout: Option<Duration>,
    pub policy: ReplacePolicy,
    pub verbose: bool,
}

impl QiitaConfig {
    /// Build the configuration from the global flags (which already fall back
    /// to their environment variables).
    pub fn from_global(global: &crate::Global) -> Result<Self> {
        if global.count == 0 {
            return Err(Error::Config("--count must be at least 1".to_string()).into());
        }

        if global.base_url.trim().is_empty() {
            return Err(Error::Config("--base-url must not be empty".to_string()).into());
        }

        Ok(Self {
            endpoints: Endpoints::new(global.base_url.trim())
                .with_user_scope(global.user_scope.clone()),
            count: global.count,
            timeout: global.timeout.map(Duration::from_secs),
            policy: global.policy.into(),
            verbose: global.verbose,
        })
    }

    /// Apply per-command overrides
    pub fn with_overrides(mut self, count: Option<u32>) -> Result<Self> {
        if let Some(count) = count {
            if count == 0 {
                return Err(Error::Config("count must be at least 1".to_string()).into());
            }
            self.count = count;
        }
        Ok(self)
    }
}

/// Open (or create) the file logs are appended to
pub fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Initialise `env_logger` from `RUST_LOG`.
///
/// The terminal UI owns stdout and stderr while it runs, so logs go to
/// `log_file` when one is given.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();

    if let Some(path) = log_file {
        let file = open_log_file(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .map_err(|e| eyre!("Failed to initialise logging: {}", e))
}
