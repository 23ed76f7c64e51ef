//! Job lookup and condition → light mapping.
//!
//! ## Colour mapping
//!
//! | Condition token        | Light state                          |
//! |------------------------|--------------------------------------|
//! | `blue…`                | `GREEN`                              |
//! | `yellow…`              | `ORANGE`                             |
//! | `red…`                 | `RED`                                |
//! | `disabled…`            | `OFF`                                |
//! | `grey…`                | `RED + ORANGE + GREEN + BLINKING`    |
//! | `…anime` (any prefix)  | adds `BLINKING` (build in progress)  |
//!
//! Anything else maps to [`LightState::NONE`].

use log::debug;

use crate::error::ResolveError;
use crate::light::LightState;

use super::document::StatusDocument;

const GREY: LightState = LightState::from_bits(
    LightState::RED.bits()
        | LightState::ORANGE.bits()
        | LightState::GREEN.bits()
        | LightState::BLINKING.bits(),
);

/// Prefix rules, checked in order. Prefixes are disjoint, so at most one
/// applies.
const PREFIX_RULES: [(&str, LightState); 5] = [
    ("blue", LightState::GREEN),
    ("yellow", LightState::ORANGE),
    ("red", LightState::RED),
    ("disabled", LightState::OFF),
    ("grey", GREY),
];

/// Suffix Jenkins appends while a build is running.
const RUNNING_SUFFIX: &str = "anime";

/// Map a raw condition token to its light state.
pub fn colour_to_light(condition: &str) -> LightState {
    let mut state = PREFIX_RULES
        .iter()
        .find(|(prefix, _)| condition.starts_with(*prefix))
        .map_or(LightState::NONE, |(_, state)| *state);

    if condition.ends_with(RUNNING_SUFFIX) {
        state |= LightState::BLINKING;
    }
    state
}

/// Parse `raw` and resolve the light state of `job`.
pub fn resolve(raw: &str, job: &str) -> Result<LightState, ResolveError> {
    let document = StatusDocument::parse(raw)?;
    resolve_document(&document, job)
}

/// Resolve the light state of `job` in an already parsed document.
pub fn resolve_document(document: &StatusDocument, job: &str) -> Result<LightState, ResolveError> {
    let record = document
        .find_job(job)
        .ok_or_else(|| ResolveError::UnknownJob(job.to_owned()))?;
    let state = colour_to_light(record.condition());
    debug!("job '{}' reports '{}' -> {}", job, record.condition(), state);
    Ok(state)
}

/// Resolver bound to the one job being monitored.
#[derive(Debug, Clone)]
pub struct StatusResolver {
    job: String,
}

impl StatusResolver {
    pub fn new(job: impl Into<String>) -> Self {
        Self { job: job.into() }
    }

    pub fn job(&self) -> &str {
        &self.job
    }

    pub fn resolve(&self, raw: &str) -> Result<LightState, ResolveError> {
        resolve(raw, &self.job)
    }
}
