//! Signal driver — turns a [`LightState`] into timed port writes.
//!
//! The poll loop calls [`drive`] once per tick. Each call performs exactly
//! one pattern period and returns; repetition is the caller's job.
//!
//! ## Patterns
//!
//! | Pattern | Phases                                  | Period  |
//! |---------|-----------------------------------------|---------|
//! | Steady  | colour 1000 ms                          | 1000 ms |
//! | Blink   | colour 500 ms, then `OFF_VALUE` 500 ms  | 1000 ms |
//!
//! Both periods are equal, so one tick lasts about a second whichever
//! pattern is shown.

use embedded_hal::delay::DelayNs;

use crate::app::ports::LightPort;
use crate::light::LightState;

/// Hold time of a steady pattern.
pub const STEADY_HOLD_MS: u32 = 1000;
/// Hold time of each half of a blink cycle.
pub const BLINK_PHASE_MS: u32 = 500;
/// Port value written during the off half of a blink cycle.
pub const OFF_VALUE: u8 = LightState::COLOUR_MASK;

/// One port write and how long it is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub value: u8,
    pub hold_ms: u32,
}

/// Output pattern for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Steady(u8),
    Blink(u8),
}

impl Pattern {
    pub fn for_state(state: LightState) -> Self {
        if state.is_blinking() {
            Self::Blink(state.port_value())
        } else {
            Self::Steady(state.port_value())
        }
    }

    /// The writes of one period, in order.
    pub fn phases(self) -> impl Iterator<Item = Phase> {
        let (first, second) = match self {
            Self::Steady(value) => (
                Phase {
                    value,
                    hold_ms: STEADY_HOLD_MS,
                },
                None,
            ),
            Self::Blink(value) => (
                Phase {
                    value,
                    hold_ms: BLINK_PHASE_MS,
                },
                Some(Phase {
                    value: OFF_VALUE,
                    hold_ms: BLINK_PHASE_MS,
                }),
            ),
        };
        core::iter::once(first).chain(second)
    }

    pub fn period_ms(self) -> u32 {
        self.phases().map(|p| p.hold_ms).sum()
    }
}

/// Drive one pattern period of `state` onto `light`.
pub fn drive(state: LightState, light: &mut impl LightPort, delay: &mut impl DelayNs) {
    for phase in Pattern::for_state(state).phases() {
        light.write(phase.value);
        delay.delay_ms(phase.hold_ms);
    }
}
