//! Chart data fetching.

use std::time::Duration;

use iced::Task;
use reqwest::{Client, Url};

use ghstats_common::{ChartPayload, Error, Result, ViewerConfig};

use crate::demo::DemoSource;
use crate::message::Message;
use crate::widget::FetchRequest;

/// Simulated round trip for demo responses.
const DEMO_LATENCY: Duration = Duration::from_millis(150);

/// Where chart data comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// The traffic server over HTTP.
    Http(Client),
    /// Generated locally.
    Demo(DemoSource),
}

impl DataSource {
    /// HTTP source with a per-request timeout.
    pub fn http(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(DataSource::Http(client))
    }

    pub fn demo() -> Self {
        DataSource::Demo(DemoSource::new())
    }

    /// Source selected by the configuration.
    pub fn from_config(config: &ViewerConfig) -> Result<Self> {
        if config.demo {
            Ok(Self::demo())
        } else {
            Self::http(Duration::from_secs(config.server.timeout_secs))
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, DataSource::Demo(_))
    }

    /// Fetch the payload for `url`.
    pub async fn fetch(&self, url: Url) -> Result<ChartPayload> {
        match self {
            DataSource::Http(client) => fetch_chart_data(client, url).await,
            DataSource::Demo(demo) => {
                tokio::time::sleep(DEMO_LATENCY).await;
                demo.respond(&url)
            }
        }
    }

    /// Run a request and report the result as [`Message::ChartLoaded`].
    pub fn load(&self, request: FetchRequest) -> Task<Message> {
        let FetchRequest {
            chart_id,
            token,
            url,
        } = request;
        let source = self.clone();

        tracing::debug!(chart = %chart_id, token = %token, url = %url, "Requesting chart data");

        Task::perform(
            async move { source.fetch(url).await.map_err(|e| e.to_string()) },
            move |result| Message::ChartLoaded(chart_id, token, result),
        )
    }
}

/// GET `url` and decode the body as a [`ChartPayload`].
///
/// Non-2xx statuses are errors.
pub async fn fetch_chart_data(client: &Client, url: Url) -> Result<ChartPayload> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| Error::Http(format!("{}: {}", url, e)))?
        .error_for_status()
        .map_err(|e| Error::Http(e.to_string()))?;

    let body = response
        .bytes()
        .await
        .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))?;

    ChartPayload::from_json(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let mut config = ViewerConfig::default();
        assert!(!DataSource::from_config(&config).unwrap().is_demo());

        config.demo = true;
        assert!(DataSource::from_config(&config).unwrap().is_demo());
    }

    #[tokio::test]
    async fn test_demo_fetch() {
        let url = Url::parse("http://demo.local/traffic-data/?data_metric=uniques").unwrap();
        let payload = DataSource::demo().fetch(url).await.unwrap();
        assert!(!payload.dataset_ids.is_empty());
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        // Nothing listens on port 9 (discard) in the test environment.
        let source = DataSource::http(Duration::from_secs(2)).unwrap();
        let url = Url::parse("http://127.0.0.1:9/traffic-data/").unwrap();
        let result = source.fetch(url).await;
        assert!(matches!(result, Err(Error::Http(_))));
    }
}
