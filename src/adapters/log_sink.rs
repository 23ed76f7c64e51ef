//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing monitor events through the `log`
//! facade (stderr via `env_logger` in production). Degradations go out
//! at error level so they land on the error channel.

use log::{error, info, warn};

use crate::app::events::{Degradation, MonitorEvent};
use crate::app::ports::EventSink;

/// Adapter that logs every [`MonitorEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MonitorEvent) {
        match event {
            MonitorEvent::Started {
                job,
                url,
                refresh_rate_secs,
            } => {
                info!(
                    "START | job={} | source={} | refresh every {}s",
                    job, url, refresh_rate_secs
                );
            }
            MonitorEvent::LightChanged { from, to } => {
                info!("LIGHT | {} -> {}", from, to);
            }
            MonitorEvent::Degraded(reason) => match reason {
                Degradation::FetchFailed(e) => {
                    error!("FETCH | could not retrieve status ({})", e);
                }
                Degradation::ParseFailed(e) => {
                    error!("PARSE | {}", e);
                }
                Degradation::UnknownJob(job) => {
                    error!("JOB   | unknown job name: {}", job);
                }
                Degradation::UnrecognisedCondition => {
                    warn!("JOB   | job reports no recognised condition");
                }
            },
            MonitorEvent::Recovered => {
                info!("FETCH | status available again");
            }
            MonitorEvent::Halted(e) => {
                error!("HALT  | giving up after fetch failure: {}", e);
            }
        }
    }
}
