//! Maps a CI job outcome onto a single PagerDuty call.

use pagerduty::{ChangeEvent, ChangeEventPayload, Severity, V2Event, V2Payload};
use serde_json::{Map, Value};
use tracing::{info, info_span, warn, Instrument};

use crate::args::Args;
use crate::client::IncidentClient;
use crate::error::{Operation, PluginError};

/// Status reported by the CI runner for the current job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Success,
    Failed,
    Running,
    Aborted,
    Expired,
    Unknown(String),
}

impl JobStatus {
    /// Parse a runner-provided status, ignoring ASCII case.
    #[must_use]
    pub fn parse(status: &str) -> Self {
        match status.to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "failed" => Self::Failed,
            "running" => Self::Running,
            "aborted" => Self::Aborted,
            "expired" => Self::Expired,
            _ => Self::Unknown(status.to_string()),
        }
    }

    /// Prefix prepended to the incident summary.
    #[must_use]
    pub const fn summary_prefix(&self) -> &'static str {
        match self {
            Self::Success => "Job succeeded: ",
            Self::Failed => "Job failed: ",
            Self::Running => "Job is unstable: ",
            Self::Aborted | Self::Expired => "Job was aborted: ",
            Self::Unknown(_) => "Job status unknown: ",
        }
    }

    /// Whether the incident should be resolved rather than triggered.
    ///
    /// `None` means no event is sent for this status.
    #[must_use]
    pub const fn resolves(&self, resolve_requested: bool) -> Option<bool> {
        match self {
            Self::Success | Self::Running => Some(true),
            Self::Failed | Self::Aborted | Self::Expired => Some(resolve_requested),
            Self::Unknown(_) => None,
        }
    }
}

/// What a validated run is going to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    ChangeEvent,
    Incident(Severity),
}

/// Check required parameters in order; the first missing one wins.
fn validate(args: &Args) -> Result<Mode, PluginError> {
    if args.routing_key.is_empty() {
        return Err(PluginError::MissingRoutingKey);
    }

    if args.create_change_event {
        return Ok(Mode::ChangeEvent);
    }

    if args.dedup_key.is_empty() {
        return Err(PluginError::MissingDedupKey);
    }
    if args.job_status.is_empty() {
        return Err(PluginError::MissingJobStatus);
    }
    if args.incident_summary.is_empty() {
        return Err(PluginError::MissingSummary);
    }
    if args.incident_source.is_empty() {
        return Err(PluginError::MissingSource);
    }

    let severity = args
        .incident_severity
        .parse::<Severity>()
        .map_err(|e| PluginError::InvalidSeverity(e.0))?;

    Ok(Mode::Incident(severity))
}

/// Parse the `custom_details` setting. An empty string or `null` means no
/// details; anything else must be a JSON object.
fn parse_custom_details(raw: &str) -> Result<Map<String, Value>, PluginError> {
    if raw.is_empty() {
        return Ok(Map::new());
    }
    serde_json::from_str::<Option<Map<String, Value>>>(raw)
        .map(Option::unwrap_or_default)
        .map_err(PluginError::CustomDetails)
}

/// Run the plugin against `client`.
///
/// Sends at most one event. A change event returns as soon as it is
/// accepted; job status is only consulted for incident events. An
/// unrecognised job status is logged and treated as success.
///
/// # Errors
/// Returns a [`PluginError`] for invalid settings (before any call is made)
/// or when the PagerDuty call fails.
pub async fn exec(client: &dyn IncidentClient, args: Args) -> Result<(), PluginError> {
    let span = info_span!(
        "exec",
        routing_key = args.masked_routing_key(),
        incident_summary = %args.incident_summary,
        incident_source = %args.incident_source,
        incident_severity = %args.incident_severity,
        create_change_event = args.create_change_event,
        job_status = %args.job_status,
    );

    run(client, args).instrument(span).await
}

async fn run(client: &dyn IncidentClient, args: Args) -> Result<(), PluginError> {
    info!("Starting plugin execution");

    let severity = match validate(&args)? {
        Mode::ChangeEvent => return send_change_event(client, &args).await,
        Mode::Incident(severity) => severity,
    };

    let status = JobStatus::parse(&args.job_status);
    let summary = format!("{}{}", status.summary_prefix(), args.incident_summary);

    let Some(resolve) = status.resolves(args.resolve_incident) else {
        warn!(summary = %summary, "Unknown job status, no action taken");
        return Ok(());
    };

    info!(?status, resolve, "Job status mapped to incident action");

    if resolve {
        let event = V2Event::resolve(&args.routing_key, &args.dedup_key);
        client
            .send_incident_event(&event)
            .await
            .map_err(|source| client_error(Operation::Resolve, source))?;
        info!(dedup_key = %args.dedup_key, "Incident resolved");
    } else {
        let event = V2Event::trigger(
            &args.routing_key,
            &args.dedup_key,
            V2Payload {
                summary,
                source: args.incident_source.clone(),
                severity,
            },
        );
        client
            .send_incident_event(&event)
            .await
            .map_err(|source| client_error(Operation::Trigger, source))?;
        info!(dedup_key = %args.dedup_key, "Incident triggered");
    }

    info!("Plugin execution completed successfully");
    Ok(())
}

async fn send_change_event(client: &dyn IncidentClient, args: &Args) -> Result<(), PluginError> {
    info!("Creating change event");

    let custom_details = parse_custom_details(&args.custom_details)
        .inspect_err(|e| warn!(error = %e, "Rejecting custom details"))?;

    let event = ChangeEvent {
        routing_key: args.routing_key.clone(),
        payload: ChangeEventPayload {
            summary: args.incident_summary.clone(),
            source: args.incident_source.clone(),
            custom_details,
        },
    };

    client
        .send_change_event(&event)
        .await
        .map_err(|source| client_error(Operation::ChangeEvent, source))?;

    info!("Change event created successfully");
    Ok(())
}

fn client_error(operation: Operation, source: pagerduty::ClientError) -> PluginError {
    tracing::error!(%operation, error = %source, "PagerDuty call failed");
    PluginError::Client { operation, source }
}
