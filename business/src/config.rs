use serde::Deserialize;
use ustr::Ustr;

/// Public IP lookup used by the login flow.
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

/// API host used by native builds when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, thiserror::Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// Endpoint answering `{"ip": "..."}` for the caller's public address.
    pub ip_lookup_url: String,
    /// When false the login flow sends the loopback placeholder without a lookup.
    pub resolve_public_ip: bool,
}

/// Environment overrides, read as `ROSTER_*` variables.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    roster_api_base_url: Option<String>,
    roster_ip_lookup_url: Option<String>,
    roster_resolve_public_ip: Option<bool>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Disables the public IP lookup. Tests and offline setups use this.
    pub fn without_ip_lookup(mut self) -> Self {
        self.resolve_public_ip = false;
        self
    }

    pub fn api_url(&self) -> Ustr {
        let base = self.api_base_url.trim_end_matches('/');
        if base.is_empty() {
            Ustr::from("/api")
        } else {
            Ustr::from(&format!("{base}/api"))
        }
    }

    /// Builds the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Builds the config from an explicit set of variables.
    pub fn from_vars<S: AsRef<str>>(
        vars: impl IntoIterator<Item = (S, S)>,
    ) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_env::from_iter(vars).map_err(|e| ConfigError(e.to_string()))?;

        let mut config = Self::default();
        if let Some(base) = raw.roster_api_base_url {
            config.api_base_url = base;
        }
        if let Some(url) = raw.roster_ip_lookup_url {
            if url.trim().is_empty() {
                return Err(ConfigError("ROSTER_IP_LOOKUP_URL is empty".to_owned()));
            }
            config.ip_lookup_url = url;
        }
        if let Some(resolve) = raw.roster_resolve_public_ip {
            config.resolve_public_ip = resolve;
        }
        Ok(config)
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(target_arch = "wasm32") {
                // Same origin as the page serving the wasm bundle.
                String::new()
            } else {
                DEFAULT_API_BASE_URL.to_owned()
            },
            ip_lookup_url: DEFAULT_IP_LOOKUP_URL.to_owned(),
            resolve_public_ip: true,
        }
    }
}
