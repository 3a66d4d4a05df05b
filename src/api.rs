use crate::{
    config::Config,
    errors::{ChainwatchError, ChainwatchResult},
    logging::log_poll,
    models::{ChainSnapshot, PollLog},
};
use chrono::Utc;
use reqwest::Client;
use std::future::Future;
use std::time::{Duration, Instant};

/// Longest slice of an error body kept in `ChainwatchError::Status`.
const MAX_ERROR_BODY: usize = 200;

/// Anything that can hand out the full current chain.
pub trait ChainSource: Send + Sync + 'static {
    /// Where the chain is read from, for logs and the status line.
    fn endpoint(&self) -> &str;

    /// One round trip, no retry.
    fn fetch(&self) -> impl Future<Output = ChainwatchResult<ChainSnapshot>> + Send;
}

/// Reads the chain over HTTP.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    url: String,
}

impl FeedClient {
    pub fn new(config: &Config) -> ChainwatchResult<Self> {
        Self::with_url(config.chain_url(), config.request_timeout())
    }

    pub fn with_url(url: impl Into<String>, timeout: Duration) -> ChainwatchResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            ChainwatchError::config_error(format!("Failed to build HTTP client: {}", e))
        })?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn request(&self) -> (Option<u16>, ChainwatchResult<ChainSnapshot>) {
        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => return (None, Err(e.into())),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return (
                Some(status.as_u16()),
                Err(ChainwatchError::Status {
                    status: status.as_u16(),
                    body: body.chars().take(MAX_ERROR_BODY).collect(),
                }),
            );
        }

        let result = match response.bytes().await {
            Ok(body) => ChainSnapshot::from_slice(&body),
            Err(e) => Err(e.into()),
        };
        (Some(status.as_u16()), result)
    }
}

impl ChainSource for FeedClient {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> ChainwatchResult<ChainSnapshot> {
        let started = Instant::now();
        let (response_status, result) = self.request().await;

        let summary = match &result {
            Ok(snapshot) => format!("{} blocks", snapshot.len()),
            Err(e) => format!("failed: {}", e),
        };
        log_poll(&PollLog {
            timestamp: Utc::now(),
            endpoint: self.url.clone(),
            summary,
            response_status,
            response_time_ms: started.elapsed().as_millis(),
        });

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn client_for(server: &MockServer) -> FeedClient {
        FeedClient::with_url(format!("{}/chain", server.uri()), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_chain_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chain"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "length": 2,
                "chain": [
                    {"index": 0, "timestamp": 1718000000.0, "voter_id": "GENESIS",
                     "candidate": "System Initialization", "previous_hash": "0", "hash": "h0"},
                    {"index": 1, "timestamp": 1718000010.0, "voter_id": "ab12",
                     "candidate": "c1", "previous_hash": "h0", "hash": "h1"}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let snapshot = client_for(&mock_server).await.fetch().await.unwrap();

        assert_eq!(snapshot.length, 2);
        assert!(snapshot.is_consistent());
        assert_eq!(snapshot.chain[1].hash, "h1");
    }

    #[tokio::test]
    async fn test_fetch_chain_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chain"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).await.fetch().await.unwrap_err();

        match err {
            ChainwatchError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_chain_bad_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chain"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).await.fetch().await.unwrap_err();
        assert!(matches!(err, ChainwatchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_chain_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chain"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"length": 0, "chain": []}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client =
            FeedClient::with_url(format!("{}/chain", mock_server.uri()), Duration::from_millis(50))
                .unwrap();
        let err = client.fetch().await.unwrap_err();

        assert!(matches!(err, ChainwatchError::Fetch(_)));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_unreachable_ledger() {
        let client =
            FeedClient::with_url("http://127.0.0.1:9/chain", Duration::from_millis(500)).unwrap();
        assert!(client.fetch().await.is_err());
    }
}
