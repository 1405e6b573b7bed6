//! Plugin configuration, read from `PLUGIN_*` environment variables.

use clap::{Parser, ValueEnum};

/// Placeholder logged in place of the routing key.
const MASKED_ROUTING_KEY: &str = "XXXXXXXXXXXXXXXXXXXXXXXX";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for one plugin run.
///
/// Every field can be given as a flag or through the environment variable
/// the CI runner exports for plugin settings.
#[derive(Debug, Clone, Parser)]
#[command(name = "drone-pagerduty")]
#[command(about = "Trigger, resolve or annotate PagerDuty incidents from a CI job")]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Events API integration key.
    #[arg(long, env = "PLUGIN_ROUTING_KEY", default_value = "", hide_env_values = true)]
    pub routing_key: String,

    /// Incident or change summary.
    #[arg(long, env = "PLUGIN_INCIDENT_SUMMARY", default_value = "")]
    pub incident_summary: String,

    /// Component or host the event originates from.
    #[arg(long, env = "PLUGIN_INCIDENT_SOURCE", default_value = "")]
    pub incident_source: String,

    /// One of critical, error, warning, info.
    #[arg(long, env = "PLUGIN_INCIDENT_SEVERITY", default_value = "")]
    pub incident_severity: String,

    /// Key correlating trigger and resolve events.
    #[arg(long, env = "PLUGIN_DEDUP_KEY", default_value = "")]
    pub dedup_key: String,

    /// Send a change event instead of an incident event.
    #[arg(long, env = "PLUGIN_CREATE_CHANGE_EVENT", default_value = "false")]
    pub create_change_event: bool,

    /// Resolve instead of trigger for failed, aborted and expired jobs.
    #[arg(long, env = "PLUGIN_RESOLVE_INCIDENT", default_value = "false")]
    pub resolve_incident: bool,

    /// Status of the CI job (success, failed, running, aborted, expired).
    #[arg(long, env = "PLUGIN_JOB_STATUS", default_value = "")]
    pub job_status: String,

    /// JSON object attached to change events.
    #[arg(long, env = "PLUGIN_CUSTOM_DETAILS", default_value = "")]
    pub custom_details: String,

    /// Log filter (e.g. `info`, `debug`, `plugin=trace`).
    #[arg(long, env = "PLUGIN_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, env = "PLUGIN_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Events API base URL.
    #[arg(long, env = "PLUGIN_PAGERDUTY_URL", default_value = pagerduty::DEFAULT_BASE_URL)]
    pub pagerduty_url: String,

    /// Give up on the whole run after this many seconds (at least 1).
    #[arg(
        long,
        env = "PLUGIN_TIMEOUT_SECS",
        default_value = "60",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            routing_key: String::new(),
            incident_summary: String::new(),
            incident_source: String::new(),
            incident_severity: String::new(),
            dedup_key: String::new(),
            create_change_event: false,
            resolve_incident: false,
            job_status: String::new(),
            custom_details: String::new(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            pagerduty_url: pagerduty::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl Args {
    /// Routing key as it may appear in logs.
    #[must_use]
    pub fn masked_routing_key(&self) -> &'static str {
        if self.routing_key.is_empty() {
            ""
        } else {
            MASKED_ROUTING_KEY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "drone-pagerduty",
            "--routing-key",
            "K",
            "--incident-summary",
            "S",
            "--incident-severity",
            "critical",
            "--resolve-incident",
            "--job-status",
            "failed",
        ])
        .unwrap();

        assert_eq!(args.routing_key, "K");
        assert_eq!(args.incident_summary, "S");
        assert_eq!(args.incident_severity, "critical");
        assert!(args.resolve_incident);
        assert!(!args.create_change_event);
        assert_eq!(args.job_status, "failed");
        assert_eq!(args.log_format, LogFormat::Text);
        assert_eq!(args.pagerduty_url, pagerduty::DEFAULT_BASE_URL);
    }

    #[test]
    #[serial]
    fn test_zero_timeout_rejected() {
        let err = Args::try_parse_from(["drone-pagerduty", "--timeout-secs", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        let args = Args::try_parse_from(["drone-pagerduty", "--timeout-secs", "5"]).unwrap();
        assert_eq!(args.timeout_secs, 5);
    }

    #[test]
    #[serial]
    fn test_parse_env() {
        std::env::set_var("PLUGIN_ROUTING_KEY", "env-key");
        std::env::set_var("PLUGIN_CREATE_CHANGE_EVENT", "true");
        std::env::set_var("PLUGIN_CUSTOM_DETAILS", r#"{"key1":"value1"}"#);

        let args = Args::try_parse_from(["drone-pagerduty"]).unwrap();

        std::env::remove_var("PLUGIN_ROUTING_KEY");
        std::env::remove_var("PLUGIN_CREATE_CHANGE_EVENT");
        std::env::remove_var("PLUGIN_CUSTOM_DETAILS");

        assert_eq!(args.routing_key, "env-key");
        assert!(args.create_change_event);
        assert_eq!(args.custom_details, r#"{"key1":"value1"}"#);
    }

    #[test]
    fn test_routing_key_masked() {
        let args = Args {
            routing_key: "R0UT1NG".to_string(),
            ..Args::default()
        };
        assert_eq!(args.masked_routing_key(), MASKED_ROUTING_KEY);
        assert_eq!(Args::default().masked_routing_key(), "");
    }
}
