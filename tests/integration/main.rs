//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises one subsystem against
//! mock adapters. Nothing here touches the network or a real port.

mod poll_loop_tests;
