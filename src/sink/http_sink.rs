//! An HTTP POST [`ResultSink`].

use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use crate::config::HttpSinkConfig;
use crate::error::{SinkError, SinkResult};

use super::ResultSink;

/// Posts each accepted result, parsed back into a `serde_json::Value`, as the
/// JSON body of a request to [`HttpSinkConfig::url`]. A non-2xx response
/// becomes [`SinkError::Http`]; a transport failure becomes
/// [`SinkError::Transport`].
pub struct HttpResultSink {
    client: Client,
    config: HttpSinkConfig,
}

impl HttpResultSink {
    pub fn new(config: HttpSinkConfig) -> Self {
        Self { client: Client::new(), config }
    }
}

#[async_trait]
impl ResultSink for HttpResultSink {
    #[instrument(skip(self, json_text), fields(url = %self.config.url))]
    async fn accept(&self, json_text: &str) -> SinkResult<()> {
        let body: serde_json::Value = serde_json::from_str(json_text)?;

        let response = self
            .client
            .post(&self.config.url)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SinkError::Http { status: status.as_u16(), body })
        }
    }
}
