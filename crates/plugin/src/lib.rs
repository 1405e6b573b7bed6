//! CI plugin that reports job outcomes to PagerDuty.
//!
//! A single run validates its [`Args`], decides between a change event and
//! an incident event, and makes at most one call through an
//! [`IncidentClient`]:
//!
//! - change events are sent as-is, with optional JSON custom details
//! - for incident events the job status selects trigger or resolve and
//!   prefixes the summary (`Job failed: ...`, `Job succeeded: ...`)
//! - an unrecognised job status sends nothing and still succeeds
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use pagerduty::EventsClient;
//! use plugin::{exec, Args};
//!
//! let client = EventsClient::new()?;
//! let args = Args {
//!     routing_key: "routing-key".to_string(),
//!     incident_summary: "nightly build".to_string(),
//!     incident_source: "ci".to_string(),
//!     incident_severity: "error".to_string(),
//!     dedup_key: "nightly".to_string(),
//!     job_status: "failed".to_string(),
//!     ..Args::default()
//! };
//! exec(&client, args).await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod args;
pub mod client;
pub mod dispatcher;
pub mod error;

pub use args::{Args, LogFormat};
pub use client::IncidentClient;
pub use dispatcher::{exec, JobStatus};
pub use error::{Operation, PluginError};
