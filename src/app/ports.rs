//! Port traits — the hexagonal boundary between the monitor core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PollLoop (domain)
//! ```
//!
//! Driven adapters (HTTP source, parallel port, log sink) implement these
//! traits. The [`PollLoop`](super::poll_loop::PollLoop) consumes them via
//! generics, so the core never touches the network or the port directly.
//!
//! Time is the one capability not defined here: delays go through
//! [`embedded_hal::delay::DelayNs`], so tests can swap in a recording
//! clock that never sleeps.

use crate::error::FetchError;

// ───────────────────────────────────────────────────────────────
// Status source (driven adapter: CI server → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: returns the raw status text served at `url`.
///
/// Timeouts are the implementation's business; the core waits as long
/// as `fetch` blocks.
pub trait StatusSource {
    fn fetch(&mut self, url: &str) -> Result<String, FetchError>;
}

// ───────────────────────────────────────────────────────────────
// Light port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: puts a 3-bit value on the traffic light.
///
/// Infallible from the core's point of view; adapters log their own
/// failures and keep going.
pub trait LightPort {
    fn write(&mut self, value: u8);
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`MonitorEvent`](super::events::MonitorEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::MonitorEvent);
}
