//! Application configuration consumed by the link builders.
//!
//! The link builders never read global state; the base sub-path the UI is
//! served under is passed in as an [`AppConfig`].

/// Configuration shared by every link builder.
///
/// # Examples
///
/// ```
/// use alertkit::AppConfig;
///
/// let config = AppConfig::new("/grafana/");
/// assert_eq!(config.app_sub_url(), "/grafana");
/// assert_eq!(config.url_for("/alerting/list"), "/grafana/alerting/list");
///
/// // Served from the domain root.
/// assert_eq!(AppConfig::default().url_for("/explore"), "/explore");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppConfig {
    app_sub_url: String,
}

impl AppConfig {
    /// Create a configuration for an application served under `app_sub_url`.
    ///
    /// Trailing slashes are dropped so paths can be appended directly.
    pub fn new(app_sub_url: impl Into<String>) -> Self {
        let mut app_sub_url = app_sub_url.into();
        let trimmed = app_sub_url.trim_end_matches('/').len();
        app_sub_url.truncate(trimmed);
        Self { app_sub_url }
    }

    /// The base sub-path, without a trailing slash. Empty when served at `/`.
    pub fn app_sub_url(&self) -> &str {
        &self.app_sub_url
    }

    /// Prefix an absolute application path with the sub-path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.app_sub_url, path)
    }
}
