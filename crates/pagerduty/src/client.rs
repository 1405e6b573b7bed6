//! HTTP client for the PagerDuty Events API v2.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::events::{ChangeEvent, ChangeEventResponse, V2Event, V2EventResponse};

/// Base URL for the Events API.
pub const DEFAULT_BASE_URL: &str = "https://events.pagerduty.com";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENQUEUE_PATH: &str = "/v2/enqueue";
const CHANGE_ENQUEUE_PATH: &str = "/v2/change/enqueue";

/// Events API v2 client.
///
/// Authentication is carried by the routing key inside each event, so the
/// client itself holds no credentials.
#[derive(Clone)]
pub struct EventsClient {
    client: Client,
    base_url: String,
}

impl EventsClient {
    /// Create a client for the public Events API endpoint.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit per-request timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a trigger or resolve event.
    ///
    /// # Errors
    /// Returns error on transport failure or a non-2xx response.
    pub async fn manage_event(&self, event: &V2Event) -> Result<V2EventResponse, ClientError> {
        debug!(action = %event.event_action, "Sending incident event");
        self.post(ENQUEUE_PATH, event).await
    }

    /// Send a change event.
    ///
    /// # Errors
    /// Returns error on transport failure or a non-2xx response.
    pub async fn create_change_event(
        &self,
        event: &ChangeEvent,
    ) -> Result<ChangeEventResponse, ClientError> {
        debug!(summary = %event.payload.summary, "Sending change event");
        self.post(CHANGE_ENQUEUE_PATH, event).await
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "POST request");

        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| {
                warn!(error = %e, body = %text, "Failed to parse response");
                ClientError::Serialization(e)
            })
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(status = %status, "PagerDuty rate limit hit");
            Err(ClientError::RateLimited { message: text })
        } else {
            warn!(status = %status, body = %text, "PagerDuty request failed");
            Err(ClientError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}
