//! Unified error types for the traffic light monitor.
//!
//! One typed enum per concern, plus a top-level [`Error`] for everything
//! that can stop the process: configuration and device acquisition at
//! boot, and a failed fetch under the exit policy. Resolve failures never
//! leave the poll loop; they only switch the light to its fallback.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum Error {
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("output: {0}")]
    Output(#[from] OutputError),
}

// ---------------------------------------------------------------------------
// Fetch errors (transport level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Host unreachable, connection refused, DNS failure, timeout.
    #[error("transport failure for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be read as text.
    #[error("unreadable response body from {url}: {reason}")]
    Body { url: String, reason: String },
}

// ---------------------------------------------------------------------------
// Resolve errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The payload is not a valid status document.
    #[error("couldn't parse status document: {0}")]
    Parse(String),

    /// The document is valid but lists no job with this name.
    #[error("unknown job name: {0}")]
    UnknownJob(String),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no job name specified")]
    MissingJob,

    #[error("no server url specified")]
    MissingServer,

    #[error("server url must start with http:// or https://, got {0}")]
    InvalidServer(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("couldn't read config file {path}: {reason}")]
    File { path: String, reason: String },
}

// ---------------------------------------------------------------------------
// Output device errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("couldn't open {device}: {source}")]
    Open {
        device: String,
        #[source]
        source: std::io::Error,
    },

    #[error("write of 0b{value:03b} to port 0x{address:x} failed: {source}")]
    Write {
        address: u16,
        value: u8,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;
