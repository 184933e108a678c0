//! Observable events
//!
//! Every log line the service emits names one of these events.

use std::fmt;

/// Observable events in the service lifecycle and request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    StartupBegin,
    /// Configuration resolved from flags and environment
    ConfigLoaded,
    /// Document store client created
    StoreConnected,
    /// Document store not configured or unreachable; serving degraded
    StoreUnavailable,
    /// Listener bound, ready for requests
    Serving,

    // Request path
    /// A request finished (any status)
    RequestComplete,
    /// A record was inserted
    RecordCreated,
    /// Generation job transitioned to completed
    JobCompleted,
    /// Generation job transitioned to failed
    JobFailed,
    /// Deployment record created
    ModelDeployed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StartupBegin => "SERVICE_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreConnected => "STORE_CONNECTED",
            Event::StoreUnavailable => "STORE_UNAVAILABLE",
            Event::Serving => "SERVICE_SERVING",
            Event::RequestComplete => "REQUEST_COMPLETE",
            Event::RecordCreated => "RECORD_CREATED",
            Event::JobCompleted => "JOB_COMPLETED",
            Event::JobFailed => "JOB_FAILED",
            Event::ModelDeployed => "MODEL_DEPLOYED",
        }
    }

    /// Returns true if this event reports a failure or degradation
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::StoreUnavailable | Event::JobFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::StartupBegin,
            Event::ConfigLoaded,
            Event::StoreConnected,
            Event::StoreUnavailable,
            Event::Serving,
            Event::RequestComplete,
            Event::RecordCreated,
            Event::JobCompleted,
            Event::JobFailed,
            Event::ModelDeployed,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_failure_events() {
        assert!(Event::StoreUnavailable.is_failure());
        assert!(Event::JobFailed.is_failure());
        assert!(!Event::JobCompleted.is_failure());
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::Serving), "SERVICE_SERVING");
    }
}
