//! Trafficlight library.
//!
//! Exposes the monitor core and its adapters for integration testing:
//! status resolution (`status`), the light encoding (`light`), the
//! signal and port drivers (`drivers`), the poll loop and its port traits
//! (`app`), and the concrete adapters (`adapters`).

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod light;
pub mod pins;
pub mod status;
