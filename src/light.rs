//! Canonical light state.
//!
//! A [`LightState`] is a small bitfield of independent logical flags:
//! three colours, an `OFF` sentinel and a `BLINKING` modifier. The wire
//! encoding lives in [`LightState::port_value`] only.
//!
//! | Flag       | Bits      | Port value (active-low, see [`crate::pins`]) |
//! |------------|-----------|----------------------------------------------|
//! | `RED`      | `0b00001` | `0b011`                                      |
//! | `ORANGE`   | `0b00010` | `0b101`                                      |
//! | `GREEN`    | `0b00100` | `0b110`                                      |
//! | `OFF`      | `0b01000` | `0b111`                                      |
//! | `BLINKING` | `0b10000` | never written                                |
//!
//! The port values of the set flags are ORed together. Any two colours
//! therefore collapse onto `0b111` on the wire, so the "grey" all-colours
//! state and `OFF` look the same at the port while staying distinct
//! values here.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

use crate::pins;

/// Resolved signal value for the traffic light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LightState(u8);

impl LightState {
    /// Degenerate zero value: no flag at all ("nothing recognised").
    pub const NONE: Self = Self(0);
    pub const RED: Self = Self(0b0000_0001);
    pub const ORANGE: Self = Self(0b0000_0010);
    pub const GREEN: Self = Self(0b0000_0100);
    /// Drive no colour.
    pub const OFF: Self = Self(0b0000_1000);
    /// Alternate with an off phase instead of holding steady.
    pub const BLINKING: Self = Self(0b0001_0000);

    /// The 3-bit field that is actually written to the port.
    pub const COLOUR_MASK: u8 = pins::LAMP_LINES;

    const ALL: u8 = Self::RED.0 | Self::ORANGE.0 | Self::GREEN.0 | Self::OFF.0 | Self::BLINKING.0;

    /// Flag → port value, in display order.
    const WIRE: [(Self, u8, &'static str); 4] = [
        (Self::RED, pins::LAMP_LINES & !pins::RED_LINE, "RED"),
        (Self::ORANGE, pins::LAMP_LINES & !pins::ORANGE_LINE, "ORANGE"),
        (Self::GREEN, pins::LAMP_LINES & !pins::GREEN_LINE, "GREEN"),
        (Self::OFF, pins::LAMP_LINES, "OFF"),
    ];

    /// Build a state from raw bits; bits outside the known flags are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// `true` when every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_blinking(self) -> bool {
        self.contains(Self::BLINKING)
    }

    /// `true` for the zero value produced by an unrecognised condition.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Port value for the "on" phase. A state without colour or `OFF`
    /// writes 0, which lights every lamp.
    pub fn port_value(self) -> u8 {
        Self::WIRE
            .iter()
            .filter(|(flag, _, _)| self.contains(*flag))
            .fold(0, |value, (_, wire, _)| value | wire)
    }

    /// State shown whenever the job status cannot be determined.
    pub const fn fallback() -> Self {
        Self::BLINKING
    }
}

impl BitOr for LightState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for LightState {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = Self::WIRE
            .iter()
            .filter(|(flag, _, _)| self.contains(*flag))
            .map(|(_, _, name)| *name)
            .collect();
        if self.is_blinking() {
            names.push("BLINKING");
        }
        if names.is_empty() {
            names.push("none");
        }
        write!(f, "{} (port 0b{:03b})", names.join("+"), self.port_value())
    }
}
