//! Observability for the model platform
//!
//! Structured JSON logging with typed lifecycle events. There are no
//! background threads: every log call writes its line synchronously.
//!
//! ```ignore
//! use modelforge::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::log(Severity::Info, "CUSTOM_EVENT", &[("key", "value")]);
//! log_event_with_fields(Event::RecordCreated, &[("collection", "modelspec")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
///
/// Failure events are logged at WARN so they land on stderr.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Warn
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
