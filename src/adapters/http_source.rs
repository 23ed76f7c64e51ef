//! HTTP status source.
//!
//! Implements [`StatusSource`] with a blocking `ureq` agent. One agent is
//! kept for the life of the process so connections can be reused between
//! polls; every request is bounded by a global timeout.

use std::time::Duration;

use log::debug;
use ureq::Agent;

use crate::app::ports::StatusSource;
use crate::error::FetchError;

pub struct HttpStatusSource {
    agent: Agent,
}

impl HttpStatusSource {
    pub fn new(timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

impl StatusSource for HttpStatusSource {
    fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let mut response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::StatusCode(status) => FetchError::Status {
                url: url.to_owned(),
                status,
            },
            other => FetchError::Transport {
                url: url.to_owned(),
                reason: other.to_string(),
            },
        })?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| FetchError::Body {
                url: url.to_owned(),
                reason: e.to_string(),
            })
    }
}
