use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Runtime settings shared by the client and both screens.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin; `/api/tasks` is appended to it.
    pub base_url: String,
    pub request_timeout: Duration,
    /// How long a transient notification stays active.
    pub notice_ttl: Duration,
    /// Surface failures of the background list refresh instead of only logging them.
    pub report_refresh_failures: bool,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            notice_ttl: Duration::from_secs(2),
            report_refresh_failures: false,
        }
    }
}
impl Config {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
