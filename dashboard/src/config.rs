use std::time::Duration;

use market::FeedEndpoints;
use tracing::warn;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Ticker server base URL and routes.
    pub endpoints: FeedEndpoints,

    // =========================
    // Sync configuration
    // =========================
    /// Fixed period of the ticker fetch cycle. Must be non-zero.
    pub sync_interval: Duration,

    /// Per-request timeout for both the ticker feed and the health probe.
    /// Timeouts surface as transport errors.
    pub http_timeout: Duration,

    /// Drop responses that resolve after a newer cycle already rendered.
    ///
    /// Off restores last-arriving-wins: a slow response can briefly roll the
    /// display back to older data.
    pub discard_stale_responses: bool,

    // =========================
    // Presentation
    // =========================
    /// How long a freshly updated card stays emphasized.
    pub flash: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoints: FeedEndpoints::default(),
            sync_interval: Duration::from_millis(3_000),
            http_timeout: Duration::from_millis(5_000),
            discard_stale_responses: true,
            flash: Duration::from_millis(500),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values keep their
    /// default and log a warning.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();

        let endpoints = FeedEndpoints {
            base_url: get("TICKER_BASE_URL").unwrap_or(d.endpoints.base_url),
            ticker_path: get("TICKER_PATH").unwrap_or(d.endpoints.ticker_path),
            health_path: get("HEALTH_PATH").unwrap_or(d.endpoints.health_path),
        };

        Self {
            endpoints,
            sync_interval: millis(&get, "SYNC_INTERVAL_MS", d.sync_interval),
            http_timeout: millis(&get, "HTTP_TIMEOUT_MS", d.http_timeout),
            discard_stale_responses: flag(
                &get,
                "DISCARD_STALE_RESPONSES",
                d.discard_stale_responses,
            ),
            flash: millis(&get, "FLASH_MS", d.flash),
        }
    }
}

/// `APP_ENV=production` selects JSON log lines.
///
/// Read on its own because the logger must exist before the rest of the
/// configuration is parsed and can warn.
pub fn json_logs_from_env() -> bool {
    json_logs_from_lookup(|key| std::env::var(key).ok())
}

pub fn json_logs_from_lookup(get: impl Fn(&str) -> Option<String>) -> bool {
    get("APP_ENV").is_some_and(|v| v == "production")
}

fn millis(get: &impl Fn(&str) -> Option<String>, key: &str, default: Duration) -> Duration {
    let Some(raw) = get(key) else {
        return default;
    };

    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Duration::from_millis(ms),
        _ => {
            warn!(key, value = %raw, default_ms = default.as_millis() as u64, "invalid duration; using default");
            default
        }
    }
}

fn flag(get: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    let Some(raw) = get(key) else {
        return default;
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!(key, value = %raw, default, "invalid flag; using default");
            default
        }
    }
}
