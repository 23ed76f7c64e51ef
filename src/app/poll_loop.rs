//! Poll loop — the monitor core.
//!
//! [`PollLoop`] owns the status source, the resolver and the two pieces
//! of mutable state the monitor has: the cached light state and the tick
//! counter. Every other capability is injected at the call site, keeping
//! the loop testable with mock adapters.
//!
//! ```text
//!  StatusSource ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                   │         PollLoop          │
//!     LightPort ◀── │ resolve · cache · drive   │ ◀── DelayNs
//!                   └──────────────────────────┘
//! ```
//!
//! ## Tick
//!
//! 1. Reset the counter once it has passed the refresh rate.
//! 2. Counter at 0: fetch and resolve. Any failure caches the blinking
//!    fallback; the event is emitted only when the failure is new.
//! 3. Drive the cached state for one pattern period (≈ 1 s).
//! 4. Advance the counter.
//!
//! With [`FetchFailurePolicy::Exit`] a failed fetch ends the loop before
//! step 3 instead of retrying on the next refresh.

use core::convert::Infallible;
use core::ops::ControlFlow;

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::config::{FetchFailurePolicy, MonitorConfig};
use crate::drivers::signal;
use crate::error::{Error, FetchError, ResolveError};
use crate::light::LightState;
use crate::status::StatusResolver;

use super::events::{Degradation, MonitorEvent};
use super::ports::{EventSink, LightPort, StatusSource};

/// The monitor's control loop.
pub struct PollLoop<S: StatusSource> {
    source: S,
    resolver: StatusResolver,
    url: String,
    refresh_rate: u32,
    policy: FetchFailurePolicy,
    /// Ticks since the last fetch, in `0..=refresh_rate + 1`; a fetch
    /// happens when it is 0.
    tick_counter: u32,
    last_known_state: LightState,
    /// Active failure, if the cached state is the fallback.
    degradation: Option<Degradation>,
    tick_count: u64,
    fetch_count: u64,
}

impl<S: StatusSource> PollLoop<S> {
    /// Build the loop from a validated configuration.
    pub fn new(source: S, config: &MonitorConfig) -> Self {
        Self {
            source,
            resolver: StatusResolver::new(config.job.clone()),
            url: config.status_url(),
            refresh_rate: config.refresh_rate_secs,
            policy: config.on_fetch_failure,
            tick_counter: 0,
            last_known_state: LightState::NONE,
            degradation: None,
            tick_count: 0,
            fetch_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the loop. Call once before the first [`step`](Self::step).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&MonitorEvent::Started {
            job: self.resolver.job().to_owned(),
            url: self.url.clone(),
            refresh_rate_secs: self.refresh_rate,
        });
        info!("Poll loop started");
    }

    /// Start and tick forever. Returns only when the exit-on-failure
    /// policy stops the loop.
    pub fn run(
        &mut self,
        light: &mut impl LightPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> Result<Infallible, Error> {
        self.start(sink);
        loop {
            if let ControlFlow::Break(e) = self.step(light, delay, sink) {
                return Err(e.into());
            }
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one tick: maybe refresh, then drive the cached state once.
    pub fn step(
        &mut self,
        light: &mut impl LightPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> ControlFlow<FetchError> {
        if self.tick_counter > self.refresh_rate {
            self.tick_counter = 0;
        }

        if self.tick_counter == 0 {
            if let ControlFlow::Break(e) = self.refresh(sink) {
                return ControlFlow::Break(e);
            }
        }

        signal::drive(self.last_known_state, light, delay);

        self.tick_counter += 1;
        self.tick_count += 1;
        ControlFlow::Continue(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Light state driven on every tick until the next refresh.
    pub fn state(&self) -> LightState {
        self.last_known_state
    }

    /// Current failure, `None` while the status is known.
    pub fn degradation(&self) -> Option<&Degradation> {
        self.degradation.as_ref()
    }

    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    /// Total ticks driven since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Total fetch attempts since construction.
    pub fn fetch_count(&self) -> u64 {
        self.fetch_count
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    // ── Internal ──────────────────────────────────────────────

    fn refresh(&mut self, sink: &mut impl EventSink) -> ControlFlow<FetchError> {
        self.fetch_count += 1;
        debug!("fetch #{} from {}", self.fetch_count, self.url);

        let text = match self.source.fetch(&self.url) {
            Ok(text) => text,
            Err(e) => {
                self.degrade(Degradation::FetchFailed(e.to_string()), sink);
                if self.policy == FetchFailurePolicy::Exit {
                    sink.emit(&MonitorEvent::Halted(e.to_string()));
                    return ControlFlow::Break(e);
                }
                return ControlFlow::Continue(());
            }
        };

        match self.resolver.resolve(&text) {
            Ok(state) if !state.is_none() => self.settle(state, sink),
            Ok(_) => self.degrade(Degradation::UnrecognisedCondition, sink),
            Err(ResolveError::Parse(e)) => self.degrade(Degradation::ParseFailed(e), sink),
            Err(ResolveError::UnknownJob(job)) => self.degrade(Degradation::UnknownJob(job), sink),
        }
        ControlFlow::Continue(())
    }

    /// Cache a freshly resolved state.
    fn settle(&mut self, state: LightState, sink: &mut impl EventSink) {
        if self.degradation.take().is_some() {
            sink.emit(&MonitorEvent::Recovered);
        }
        self.set_state(state, sink);
    }

    /// Fall back to blinking; report the failure only if it is new.
    fn degrade(&mut self, reason: Degradation, sink: &mut impl EventSink) {
        let is_new = !self
            .degradation
            .as_ref()
            .is_some_and(|current| current.same_kind(&reason));
        if is_new {
            sink.emit(&MonitorEvent::Degraded(reason.clone()));
        }
        self.degradation = Some(reason);
        self.set_state(LightState::fallback(), sink);
    }

    fn set_state(&mut self, state: LightState, sink: &mut impl EventSink) {
        if state != self.last_known_state {
            sink.emit(&MonitorEvent::LightChanged {
                from: self.last_known_state,
                to: state,
            });
            self.last_known_state = state;
        }
    }
}
