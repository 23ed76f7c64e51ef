//! Application core — pure monitor logic, zero direct I/O.
//!
//! The poll loop orchestrates fetch → resolve → drive. All interaction
//! with the network, the port and the logger happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without a CI server or a traffic light.

pub mod events;
pub mod poll_loop;
pub mod ports;
