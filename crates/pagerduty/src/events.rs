//! Event types for the PagerDuty Events API v2.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Severity of a triggered alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Critical - immediate action required
    Critical,
    /// Error - something is broken
    Error,
    /// Warning - something needs attention
    Warning,
    /// Informational
    Info,
}

impl Severity {
    /// All accepted severities, in decreasing urgency.
    pub const ALL: [Self; 4] = [Self::Critical, Self::Error, Self::Warning, Self::Info];

    /// Wire value for this severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the wire severities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSeverity(pub String);

impl fmt::Display for UnknownSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity '{}'", self.0)
    }
}

impl std::error::Error for UnknownSeverity {}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str() == s)
            .ok_or_else(|| UnknownSeverity(s.to_string()))
    }
}

/// Event action understood by `/v2/enqueue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Open (or re-open) an incident
    Trigger,
    /// Close an incident
    Resolve,
}

impl Action {
    /// Wire value for this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::Resolve => "resolve",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert details attached to a trigger event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct V2Payload {
    pub summary: String,
    pub source: String,
    pub severity: Severity,
}

/// An alert event for `/v2/enqueue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct V2Event {
    pub routing_key: String,
    pub event_action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedup_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<V2Payload>,
}

impl V2Event {
    /// Build a trigger event carrying an alert payload.
    #[must_use]
    pub fn trigger(
        routing_key: impl Into<String>,
        dedup_key: impl Into<String>,
        payload: V2Payload,
    ) -> Self {
        Self {
            routing_key: routing_key.into(),
            event_action: Action::Trigger,
            dedup_key: Some(dedup_key.into()),
            payload: Some(payload),
        }
    }

    /// Build a resolve event. Resolve events carry no payload.
    #[must_use]
    pub fn resolve(routing_key: impl Into<String>, dedup_key: impl Into<String>) -> Self {
        Self {
            routing_key: routing_key.into(),
            event_action: Action::Resolve,
            dedup_key: Some(dedup_key.into()),
            payload: None,
        }
    }
}

/// Body of a successful `/v2/enqueue` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct V2EventResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub dedup_key: String,
}

/// Details of a change event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEventPayload {
    pub summary: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub custom_details: Map<String, Value>,
}

/// A change event for `/v2/change/enqueue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub routing_key: String,
    pub payload: ChangeEventPayload,
}

/// Body of a successful `/v2/change/enqueue` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEventResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_severity_parse() {
        assert_eq!("critical".parse::<Severity>(), Ok(Severity::Critical));
        assert_eq!("info".parse::<Severity>(), Ok(Severity::Info));
        assert!("Critical".parse::<Severity>().is_err());
        assert!("fatal".parse::<Severity>().is_err());
        assert!("".parse::<Severity>().is_err());
    }

    #[test]
    fn test_resolve_event_omits_payload() {
        let event = V2Event::resolve("rk", "dk");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({"routing_key": "rk", "event_action": "resolve", "dedup_key": "dk"})
        );
    }

    #[test]
    fn test_trigger_event_shape() {
        let event = V2Event::trigger(
            "rk",
            "dk",
            V2Payload {
                summary: "Job failed: build".to_string(),
                source: "ci".to_string(),
                severity: Severity::Warning,
            },
        );
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event_action"], "trigger");
        assert_eq!(value["payload"]["severity"], "warning");
        assert_eq!(
            value["payload"],
            json!({"summary": "Job failed: build", "source": "ci", "severity": "warning"})
        );
    }

    #[test]
    fn test_change_event_response_defaults() {
        let resp: ChangeEventResponse = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert_eq!(resp.status, "success");
        assert!(resp.errors.is_empty());
    }
}
