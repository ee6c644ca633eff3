use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

static DEFAULT_BASE_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://127.0.0.1:5000/").expect("valid default base URL"));

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Origin of the directory API; `/api/{type}/...` paths are joined onto it.
    /// TOML: `basic.base_url`. Default: `http://127.0.0.1:5000/`.
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Whole-request timeout. Unset keeps the transport default (none).
    /// TOML: `basic.request_timeout_secs`.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Optional HTTP proxy for the reqwest client.
    /// TOML: `basic.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            loglevel: default_loglevel(),
            base_url: default_base_url(),
            request_timeout_secs: None,
            proxy: None,
        }
    }
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_base_url() -> Url {
    DEFAULT_BASE_URL.clone()
}
