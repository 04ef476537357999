//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc, time::Duration};

use serde::Deserialize;

use super::types::Res;

/// Default restaurant search page; the query is appended percent-encoded.
fn default_search_url() -> String {
    "https://store.naver.com/restaurants/list?query=".to_string()
}

/// Default restaurant detail page; the record ID is appended verbatim.
fn default_detail_url() -> String {
    "https://store.naver.com/restaurants/detail?id=".to_string()
}

/// Default keyword that marks a recommendation request.
fn default_trigger_keyword() -> String {
    "맛집".to_string()
}

/// Default number of top results to pick from.
fn default_result_limit() -> usize {
    30
}

/// Default position of the `<script>` block holding the data payload.
fn default_script_index() -> usize {
    2
}

/// Default delay between polls of the event buffer.
fn default_poll_interval_ms() -> u64 {
    1000
}

/// Default timeout for the search page fetch.
fn default_fetch_timeout_secs() -> u64 {
    10
}

/// Default timeout for a single event read.
fn default_read_timeout_secs() -> u64 {
    5
}

/// Configuration for the matjip-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Slack bot token (`SLACK_BOT_TOKEN`).
    pub slack_bot_token: String,
    /// Slack app token, used for socket mode (`SLACK_APP_TOKEN`).
    pub slack_app_token: String,
    /// Search page URL prefix (`SEARCH_URL`).
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// Detail page URL prefix (`DETAIL_URL`).
    #[serde(default = "default_detail_url")]
    pub detail_url: String,
    /// Keyword that turns a mention into a recommendation request (`TRIGGER_KEYWORD`).
    #[serde(default = "default_trigger_keyword")]
    pub trigger_keyword: String,
    /// How many of the top results are candidates for the random pick (`RESULT_LIMIT`).
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
    /// Zero-based index of the `<script>` element that carries the JSON payload (`SCRIPT_INDEX`).
    #[serde(default = "default_script_index")]
    pub script_index: usize,
    /// Milliseconds to sleep between polls (`POLL_INTERVAL_MS`).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Seconds before the search page fetch is abandoned (`FETCH_TIMEOUT_SECS`).
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// Seconds before an event read is abandoned (`READ_TIMEOUT_SECS`).
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            slack_bot_token: String::new(),
            slack_app_token: String::new(),
            search_url: default_search_url(),
            detail_url: default_detail_url(),
            trigger_keyword: default_trigger_keyword(),
            result_limit: default_result_limit(),
            script_index: default_script_index(),
            poll_interval_ms: default_poll_interval_ms(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

impl ConfigInner {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        // Plain `SLACK_BOT_TOKEN` and friends first; prefixed variables win over them, and the file wins over both.
        let mut cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .add_source(config::Environment::default().prefix("MATJIP_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    fn validate(&self) -> Res<()> {
        if self.trigger_keyword.trim().is_empty() {
            return Err(anyhow::anyhow!("Trigger keyword must not be empty."));
        }

        if self.result_limit < 1 || self.result_limit > 100 {
            return Err(anyhow::anyhow!("Result limit must be between 1 and 100."));
        }

        if self.poll_interval_ms == 0 {
            return Err(anyhow::anyhow!("Poll interval must be greater than zero."));
        }

        if self.fetch_timeout_secs == 0 || self.read_timeout_secs == 0 {
            return Err(anyhow::anyhow!("Timeouts must be greater than zero."));
        }

        Ok(())
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config_with(inner: ConfigInner) -> Config {
        Config { inner: Arc::new(inner) }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = config_with(ConfigInner::default());

        assert!(config.validate().is_ok());
        assert_eq!(config.result_limit, 30);
        assert_eq!(config.script_index, 2);
        assert_eq!(config.trigger_keyword, "맛집");
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_rejects_zero_result_limit() {
        let config = config_with(ConfigInner { result_limit: 0, ..Default::default() });

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_trigger_keyword() {
        let config = config_with(ConfigInner {
            trigger_keyword: "  ".to_string(),
            ..Default::default()
        });

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeouts() {
        let config = config_with(ConfigInner { fetch_timeout_secs: 0, ..Default::default() });

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("matjip-bot-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
slack_bot_token = "xoxb-file"
slack_app_token = "xapp-file"
detail_url = "https://example.com/detail/"
result_limit = 5
"#
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.slack_bot_token, "xoxb-file");
        assert_eq!(config.detail_url, "https://example.com/detail/");
        assert_eq!(config.result_limit, 5);
        assert_eq!(config.search_url, default_search_url());
    }
}
