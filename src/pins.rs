//! Parallel-port line assignments for the traffic light.
//!
//! Single source of truth — the light encoding and the port driver both
//! reference this module rather than hard-coding register addresses or
//! bit positions.
//!
//! The lamps hang off the low data lines of the first parallel port and
//! are wired **active-low**: a cleared bit lights its lamp, a set bit
//! leaves it dark.

// ---------------------------------------------------------------------------
// Port I/O
// ---------------------------------------------------------------------------

/// Character device exposing raw port I/O (byte offset = I/O address).
pub const PORT_DEVICE: &str = "/dev/port";

/// Data register of the first parallel port (LPT1).
pub const DATA_REGISTER: u16 = 0x378;

// ---------------------------------------------------------------------------
// Data lines (D0–D2)
// ---------------------------------------------------------------------------

/// D0 — green lamp.
pub const GREEN_LINE: u8 = 0b0000_0001;
/// D1 — orange lamp.
pub const ORANGE_LINE: u8 = 0b0000_0010;
/// D2 — red lamp.
pub const RED_LINE: u8 = 0b0000_0100;

/// All three lamp lines. Writing this value turns every lamp off.
pub const LAMP_LINES: u8 = GREEN_LINE | ORANGE_LINE | RED_LINE;
