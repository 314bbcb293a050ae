//! Config and session store shared by every command.

use std::path::Path;

use anyhow::{Context as _, Result};
use roster_business::BusinessConfig;
use roster_business::session::FileSessionStore;
use tracing::debug;

pub struct CliContext {
    pub config: BusinessConfig,
    pub session: FileSessionStore,
}

impl CliContext {
    pub fn new(config: BusinessConfig, session: FileSessionStore) -> Self {
        Self { config, session }
    }

    /// Reads `ROSTER_*` variables, applies command-line overrides and opens the session file.
    pub fn open(
        api_url: Option<&str>,
        session_file: Option<&Path>,
        no_ip_lookup: bool,
    ) -> Result<Self> {
        let mut config =
            BusinessConfig::from_env().context("Failed to read ROSTER_* environment variables")?;
        if let Some(url) = api_url {
            config.api_base_url = url.to_owned();
        }
        if no_ip_lookup {
            config = config.without_ip_lookup();
        }

        let session = match session_file {
            Some(path) => FileSessionStore::open(path),
            None => FileSessionStore::open_default(),
        }
        .context("Failed to open the session file")?;

        debug!(api = %config.api_url(), session = %session.path().display(), "Context ready");
        Ok(Self::new(config, session))
    }
}
