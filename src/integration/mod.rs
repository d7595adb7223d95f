pub mod catalog;
pub mod orders;

use anyhow::{Result, bail};
use chrono::NaiveDateTime;

use crate::cursor::IntegrationCursor;

/// The store must hand back a timestamp after an advance. A cursor without
/// one is a persistence defect; it fails the tick rather than panicking.
pub(crate) fn advanced_timestamp(cursor: &IntegrationCursor) -> Result<NaiveDateTime> {
    match cursor.last_update {
        Some(at) => Ok(at),
        None => bail!(
            "cursor for {} has no timestamp after update",
            cursor.event_type
        ),
    }
}
