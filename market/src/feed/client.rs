use std::time::Duration;

use async_trait::async_trait;
use corelib::{TickerReading, parse_snapshot};
use reqwest::Client;
use tracing::{debug, instrument};

use super::{FeedError, HealthProbe, TickerFeed};

/// Where the ticker server lives and which routes it exposes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedEndpoints {
    pub base_url: String,
    pub ticker_path: String,
    pub health_path: String,
}

impl Default for FeedEndpoints {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            ticker_path: "/api/ticker".to_string(),
            health_path: "/actuator/health".to_string(),
        }
    }
}

/// reqwest-backed implementation of both the ticker feed and the health probe.
#[derive(Clone)]
pub struct HttpFeedClient {
    http: Client,
    endpoints: FeedEndpoints,
}

impl HttpFeedClient {
    pub fn new(endpoints: FeedEndpoints, timeout: Duration) -> Result<Self, FeedError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &FeedEndpoints {
        &self.endpoints
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoints.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl TickerFeed for HttpFeedClient {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_snapshot(&self) -> Result<Vec<TickerReading>, FeedError> {
        let url = self.url(&self.endpoints.ticker_path);

        let resp = self
            .http
            .get(&url)
            .query(&[("popular", "true")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Protocol {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        let snapshot = parse_snapshot(&body)?;

        debug!(count = snapshot.len(), "ticker snapshot fetched");

        Ok(snapshot)
    }
}

#[async_trait]
impl HealthProbe for HttpFeedClient {
    #[instrument(skip(self), level = "debug")]
    async fn probe(&self) -> Result<(), FeedError> {
        let url = self.url(&self.endpoints.health_path);

        let status = self.http.get(&url).send().await?.status();

        debug!(status = status.as_u16(), "health probe answered");

        if status.is_success() {
            Ok(())
        } else {
            Err(FeedError::Protocol {
                status: status.as_u16(),
            })
        }
    }
}
