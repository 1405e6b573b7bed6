//! Error types for plugin execution.

use std::fmt;

use pagerduty::ClientError;
use thiserror::Error;

/// Outbound operation a client failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Trigger,
    Resolve,
    ChangeEvent,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trigger => "trigger incident",
            Self::Resolve => "resolve incident",
            Self::ChangeEvent => "create change event",
        })
    }
}

/// Errors that terminate a plugin run.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("missing required parameter: routingKey")]
    MissingRoutingKey,

    #[error("missing required parameter: dedupKey when not creating a change event")]
    MissingDedupKey,

    #[error("missing required parameter: jobStatus when not creating a change event")]
    MissingJobStatus,

    #[error("missing required parameter: incidentSummary")]
    MissingSummary,

    #[error("missing required parameter: incidentSource")]
    MissingSource,

    #[error(
        "invalid severity value '{0}'; allowed values are 'critical', 'error', 'warning', 'info'"
    )]
    InvalidSeverity(String),

    /// `custom_details` was not a JSON object
    #[error("failed to parse custom details JSON: {0}")]
    CustomDetails(#[source] serde_json::Error),

    /// The PagerDuty call itself failed
    #[error("failed to {operation}: {source}")]
    Client {
        operation: Operation,
        #[source]
        source: ClientError,
    },
}

impl PluginError {
    /// True for errors raised before any network call.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        !matches!(self, Self::Client { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_message_includes_cause() {
        let err = PluginError::Client {
            operation: Operation::Resolve,
            source: ClientError::Other("API call failed".to_string()),
        };
        assert_eq!(err.to_string(), "failed to resolve incident: API call failed");
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_invalid_severity_message() {
        let err = PluginError::InvalidSeverity("fatal".to_string());
        assert!(err.to_string().starts_with("invalid severity value 'fatal'"));
        assert!(err.is_config_error());
    }
}
