//! A JWT(HS256)-signed HTTP POST [`ResultSink`].

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::instrument;

use crate::config::JwtSinkConfig;
use crate::crypto::sign_hs256;
use crate::error::{SinkError, SinkResult};

use super::ResultSink;

/// Signs each accepted result as the claims of a compact HS256 JWT, then
/// posts `{"token": "<jwt>"}` to [`JwtSinkConfig::url`].
///
/// If `json_text` does not parse as JSON, it is wrapped as
/// `{"data": "<raw text>"}` before signing rather than rejected outright —
/// this sink's job is to deliver a signed envelope, not to validate payload shape.
pub struct JwtResultSink {
    client: Client,
    config: JwtSinkConfig,
}

impl JwtResultSink {
    pub fn new(config: JwtSinkConfig) -> Self {
        Self { client: Client::new(), config }
    }
}

#[async_trait]
impl ResultSink for JwtResultSink {
    #[instrument(skip(self, json_text), fields(url = %self.config.url))]
    async fn accept(&self, json_text: &str) -> SinkResult<()> {
        let claims = serde_json::from_str(json_text).unwrap_or_else(|_| json!({ "data": json_text }));
        let token = sign_hs256(&claims, &self.config.secret, Some(self.config.issuer.as_str()))?;

        let response = self
            .client
            .post(&self.config.url)
            .timeout(self.config.timeout)
            .json(&json!({ "token": token }))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_json_payload_is_wrapped_before_signing() {
        let config = JwtSinkConfig::new("https://example.test/hook", "execqueue", "secret");
        let claims = serde_json::from_str::<serde_json::Value>("not json")
            .unwrap_or_else(|_| json!({ "data": "not json" }));
        let token = sign_hs256(&claims, &config.secret, Some(config.issuer.as_str())).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }
}
