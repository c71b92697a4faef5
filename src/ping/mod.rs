//! HTTP ping collaborator.
//!
//! A ping is a blocking GET whose body is discarded; only success or
//! failure matters to the engine. [`HttpPinger`] is the production
//! implementation; [`StubPinger`](crate::testing::StubPinger) substitutes
//! for it in tests.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::core::error::ExecutorError;

/// Capability to perform a GET against a URL with optional headers.
#[async_trait]
pub trait Pinger: Send + Sync {
    /// Perform the GET. Transport failures and non-success statuses are
    /// both errors; the response body is ignored.
    async fn get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<(), ExecutorError>;
}

/// Production pinger owning a single HTTP client for the executor's
/// lifetime.
#[derive(Debug, Clone, Default)]
pub struct HttpPinger {
    client: reqwest::Client,
}

impl HttpPinger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Pinger for HttpPinger {
    async fn get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<(), ExecutorError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        request
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| ExecutorError::Ping {
                url: url.to_string(),
                reason: error.to_string(),
            })?;
        Ok(())
    }
}
