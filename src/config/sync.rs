use serde::{Deserialize, Serialize};
use url::Url;

/// Health-platform sync configuration managed by Figment.
///
/// The OAuth endpoints are configurable so tests (and staging accounts) can point the flow at a
/// different authorization server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// OAuth client id issued by the health platform.
    /// TOML: `sync.client_id`. Default: empty (integration disabled).
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret, sent with HTTP Basic auth on the token endpoint.
    /// TOML: `sync.client_secret`.
    #[serde(default)]
    pub client_secret: String,

    /// Redirect URL registered with the platform; must route to `GET /sync/callback`.
    /// TOML: `sync.redirect_url`. Default: `http://localhost:8190/sync/callback`.
    #[serde(default = "default_redirect_url")]
    pub redirect_url: Url,

    /// TOML: `sync.auth_url`.
    #[serde(default = "default_auth_url")]
    pub auth_url: Url,

    /// TOML: `sync.token_url`.
    #[serde(default = "default_token_url")]
    pub token_url: Url,

    /// Base URL of the exercise API (`{api_url}/exercise`).
    /// TOML: `sync.api_url`.
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// TOML: `sync.scopes`. Default: `shealth.exercise.read`, `shealth.activity.read`.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    /// IANA time zone forwarded to the exercise API.
    /// TOML: `sync.time_zone`. Default: `UTC`.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// Optional upstream HTTP proxy. If set, used for the reqwest client.
    /// TOML: `sync.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Max retry attempts for upstream 5xx responses.
    /// TOML: `sync.retry_max_times`. Default: `2`.
    #[serde(default = "default_retry_max_times")]
    pub retry_max_times: usize,

    /// Trailing window used when `POST /api/sync` does not name one.
    /// TOML: `sync.default_days`. Default: `7`.
    #[serde(default = "default_days")]
    pub default_days: u32,
}

#[derive(Debug, Clone)]
pub struct SyncResolvedConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: Url,
    pub auth_url: Url,
    pub token_url: Url,
    pub api_url: Url,
    pub scopes: Vec<String>,
    pub time_zone: String,
    pub proxy: Option<Url>,
    pub retry_max_times: usize,
    pub default_days: u32,
}

impl SyncResolvedConfig {
    pub fn is_configured(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

impl SyncConfig {
    pub fn resolve(&self) -> SyncResolvedConfig {
        SyncResolvedConfig {
            client_id: self.client_id.trim().to_string(),
            client_secret: self.client_secret.trim().to_string(),
            redirect_url: self.redirect_url.clone(),
            auth_url: self.auth_url.clone(),
            token_url: self.token_url.clone(),
            api_url: self.api_url.clone(),
            scopes: self.scopes.clone(),
            time_zone: self.time_zone.clone(),
            proxy: self.proxy.clone(),
            retry_max_times: self.retry_max_times,
            default_days: self.default_days.max(1),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_url: default_redirect_url(),
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            api_url: default_api_url(),
            scopes: default_scopes(),
            time_zone: default_time_zone(),
            proxy: None,
            retry_max_times: default_retry_max_times(),
            default_days: default_days(),
        }
    }
}

fn default_redirect_url() -> Url {
    Url::parse("http://localhost:8190/sync/callback")
        .expect("default sync redirect_url must be a valid URL")
}

fn default_auth_url() -> Url {
    Url::parse("https://account.samsung.com/accounts/v1/DCXGW/signInGate")
        .expect("default sync auth_url must be a valid URL")
}

fn default_token_url() -> Url {
    Url::parse("https://account.samsung.com/accounts/v1/DCXGW/token")
        .expect("default sync token_url must be a valid URL")
}

fn default_api_url() -> Url {
    Url::parse("https://api.shealth.samsung.com/v1").expect("default sync api_url must be a valid URL")
}

fn default_scopes() -> Vec<String> {
    vec![
        "shealth.exercise.read".to_string(),
        "shealth.activity.read".to_string(),
    ]
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

fn default_retry_max_times() -> usize {
    2
}

fn default_days() -> u32 {
    7
}
