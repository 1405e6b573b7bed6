//! The incident-management capability the dispatcher depends on.

use async_trait::async_trait;
use pagerduty::{
    ChangeEvent, ChangeEventResponse, ClientError, EventsClient, V2Event, V2EventResponse,
};

/// Outbound operations used by [`crate::exec`].
///
/// Implemented for [`EventsClient`]; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IncidentClient: Send + Sync {
    /// Send a trigger or resolve event.
    async fn send_incident_event(&self, event: &V2Event)
        -> Result<V2EventResponse, ClientError>;

    /// Send a change event.
    async fn send_change_event(
        &self,
        event: &ChangeEvent,
    ) -> Result<ChangeEventResponse, ClientError>;
}

#[async_trait]
impl IncidentClient for EventsClient {
    async fn send_incident_event(
        &self,
        event: &V2Event,
    ) -> Result<V2EventResponse, ClientError> {
        self.manage_event(event).await
    }

    async fn send_change_event(
        &self,
        event: &ChangeEvent,
    ) -> Result<ChangeEventResponse, ClientError> {
        self.create_change_event(event).await
    }
}
