pub mod in_memory;

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use clap::ValueEnum;

/// Persisted progress marker for one event stream.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationCursor {
    pub event_type: String,
    pub last_update: Option<NaiveDateTime>,
}

impl IntegrationCursor {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            last_update: None,
        }
    }
}

/// How the cursor moves when an event publishes older than the stored
/// timestamp. `LastProcessed` keeps the upstream behaviour of letting the
/// last event in the page win, even backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AdvancePolicy {
    #[clap(name = "last-processed")]
    LastProcessed,
    Monotonic,
}

impl fmt::Display for AdvancePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastProcessed => write!(f, "last-processed"),
            Self::Monotonic => write!(f, "monotonic"),
        }
    }
}

impl FromStr for AdvancePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "last-processed" | "last" => Ok(Self::LastProcessed),
            "monotonic" => Ok(Self::Monotonic),
            other => Err(anyhow!("unknown cursor policy: {other}")),
        }
    }
}

#[async_trait]
pub trait CursorStore: Send + Sync {
    async fn load(&self, event_type: &str) -> Result<Option<IntegrationCursor>>;

    /// Creates the cursor for `event_type` if missing, then moves its
    /// `last_update` to `publication` under the given policy. Returns the
    /// record as persisted.
    async fn apply_or_create(
        &self,
        event_type: &str,
        publication: NaiveDateTime,
        policy: AdvancePolicy,
    ) -> Result<IntegrationCursor>;
}
