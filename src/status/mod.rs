//! Status resolution — from raw status text to a [`LightState`].
//!
//! ```text
//!   raw text ──▶ document::parse ──▶ StatusDocument ──▶ resolver ──▶ LightState
//! ```
//!
//! The parser boundary produces a typed job list once; the resolver never
//! touches untyped JSON.
//!
//! [`LightState`]: crate::light::LightState

pub mod document;
pub mod resolver;

pub use document::{JobRecord, StatusDocument};
pub use resolver::{StatusResolver, colour_to_light, resolve, resolve_document};
