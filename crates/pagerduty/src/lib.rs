//! Client for the PagerDuty Events API v2.
//!
//! Covers the two endpoints a CI pipeline needs: alert events
//! (`/v2/enqueue`) for triggering and resolving incidents, and change
//! events (`/v2/change/enqueue`) for recording deployments.
//!
//! # Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), pagerduty::ClientError> {
//! use pagerduty::{EventsClient, V2Event};
//!
//! let client = EventsClient::new()?;
//! client
//!     .manage_event(&V2Event::resolve("routing-key", "deploy-prod"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod events;

pub use client::{EventsClient, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use events::{
    Action, ChangeEvent, ChangeEventPayload, ChangeEventResponse, Severity, UnknownSeverity,
    V2Event, V2EventResponse, V2Payload,
};
