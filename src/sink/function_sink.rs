//! An in-process [`ResultSink`] for tests and single-process deployments.

use async_trait::async_trait;

use crate::error::SinkResult;

use super::ResultSink;

/// Wraps a boxed callback invoked once per accepted result. Used directly by
/// the integration tests to record results into a shared `Vec` without
/// standing up an HTTP server.
pub struct FunctionSink {
    callback: Box<dyn Fn(String) + Send + Sync>,
}

impl FunctionSink {
    pub fn new(callback: impl Fn(String) + Send + Sync + 'static) -> Self {
        Self { callback: Box::new(callback) }
    }
}

#[async_trait]
impl ResultSink for FunctionSink {
    async fn accept(&self, json_text: &str) -> SinkResult<()> {
        (self.callback)(json_text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn records_every_accepted_payload_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let sink = FunctionSink::new(move |text| recorder.lock().unwrap().push(text));

        sink.accept("{}").await.unwrap();
        sink.accept(r#"{"a":1}"#).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["{}".to_string(), r#"{"a":1}"#.to_string()]);
    }
}
