//! Outbound monitor events.
//!
//! The [`PollLoop`](super::poll_loop::PollLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Failure events are only
//! emitted when the failure first shows up or changes kind, never once
//! per tick.

use crate::light::LightState;

/// Why the displayed state fell back to the blinking fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// The status source could not be reached or answered badly.
    FetchFailed(String),
    /// The payload was not a valid status document.
    ParseFailed(String),
    /// The document does not list the monitored job.
    UnknownJob(String),
    /// The job reported a condition no colour rule recognises.
    UnrecognisedCondition,
}

impl Degradation {
    /// Two degradations are the same kind when only their detail differs.
    pub fn same_kind(&self, other: &Self) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}

/// Structured events emitted by the monitor core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    /// The loop is about to run its first tick.
    Started {
        job: String,
        url: String,
        refresh_rate_secs: u32,
    },

    /// A fetch resolved to a different light state than the cached one.
    LightChanged { from: LightState, to: LightState },

    /// Status became unknown; the light is blinking the fallback.
    Degraded(Degradation),

    /// A valid status was resolved again after a degradation.
    Recovered,

    /// The loop stopped after a fetch failure (exit-on-failure policy).
    Halted(String),
}
