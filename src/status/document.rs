//! Typed view of the Jenkins `/api/json` status document.
//!
//! Only the fields the resolver needs are kept; everything else in the
//! payload is ignored. The parser is lenient about shape where Jenkins
//! itself is: a missing or `null` job list is an empty list, a job
//! without a name never matches, a job without a colour reports an empty
//! condition. Non-string `name`/`color` values are read as their JSON
//! text, so one odd record cannot reject the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ResolveError;

/// The job list as presented by the server, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub jobs: Vec<JobRecord>,
}

/// One `{ name, color }` entry of the job list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobRecord {
    #[serde(default, deserialize_with = "as_text")]
    pub name: Option<String>,
    /// Raw condition token, e.g. `blue`, `red_anime`, `disabled`.
    #[serde(default, rename = "color", deserialize_with = "as_text")]
    pub condition: Option<String>,
}

impl StatusDocument {
    /// Parse raw status text.
    pub fn parse(text: &str) -> Result<Self, ResolveError> {
        serde_json::from_str(text).map_err(|e| ResolveError::Parse(e.to_string()))
    }

    /// First job whose name equals `name`, ignoring ASCII case.
    pub fn find_job(&self, name: &str) -> Option<&JobRecord> {
        self.jobs.iter().find(|job| {
            job.name
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
    }
}

impl JobRecord {
    pub fn new(name: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            condition: Some(condition.into()),
        }
    }

    /// Condition token, empty when the server sent none.
    pub fn condition(&self) -> &str {
        self.condition.as_deref().unwrap_or_default()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<JobRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<JobRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

fn as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}
