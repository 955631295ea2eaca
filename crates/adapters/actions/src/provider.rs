//! Provider relay client — one HTTP client for the SMS/email/CRM relay.
//!
//! The concrete providers behind the relay are not this crate's concern;
//! each handler only needs a JSON `POST` with a bounded deadline.

use std::time::Duration;

use ringflow_app::ports::ActionFailure;

/// Configuration for the provider relay.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the relay, e.g. `http://provider-relay.internal`.
    pub base_url: String,
    /// Hard deadline for each relay call.
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8600".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// HTTP client for the provider relay.
pub struct ProviderGateway {
    client: reqwest::Client,
    base_url: String,
}

impl ProviderGateway {
    /// Build a gateway with the configured timeout baked into the client.
    ///
    /// # Errors
    ///
    /// Returns a [`reqwest::Error`] if the client cannot be constructed.
    pub fn new(config: &ProviderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `POST` a JSON body to a relay path.
    ///
    /// # Errors
    ///
    /// [`ActionFailure::Timeout`] when the deadline elapses,
    /// [`ActionFailure::Provider`] for transport errors and non-2xx
    /// responses.
    pub async fn post(&self, path: &str, body: &serde_json::Value) -> Result<(), ActionFailure> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ActionFailure::Provider(format!(
                "{path} returned {status}"
            )))
        }
    }
}

/// Classify a reqwest error into the action failure taxonomy.
pub(crate) fn map_transport_error(err: reqwest::Error) -> ActionFailure {
    if err.is_timeout() {
        ActionFailure::Timeout
    } else {
        ActionFailure::Provider(err.to_string())
    }
}
