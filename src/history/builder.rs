use serde_json::Value;
use tracing::debug;

use crate::error::HistoryResult;
use crate::models::{Message, VersionEntry};
use crate::parsers::parse_message;

/// Derive the version sequence of a message.
///
/// Entry 0 is the current content, stamped with the last edit time (or the
/// creation time for an unedited message). Entries `1..=n` follow
/// `metadata.history` in stored order, so higher versions are older.
pub fn build_history(message: &Message) -> Vec<VersionEntry> {
    let history = message.history();
    let mut entries = Vec::with_capacity(history.len() + 1);

    entries.push(VersionEntry {
        content: message.content.clone(),
        edited_at: message.effective_edited_at(),
        version: 0,
    });

    entries.extend(history.iter().enumerate().map(|(i, record)| VersionEntry {
        content: record.content.clone(),
        edited_at: record.edited_at,
        version: i + 1,
    }));

    debug!(message = %message.id, versions = entries.len(), "Built version sequence");
    entries
}

/// Derive the version sequence from a raw message document.
///
/// Fails with `MalformedHistory` if any history record is invalid; no record
/// is dropped.
pub fn build_history_from_value(value: &Value) -> HistoryResult<Vec<VersionEntry>> {
    let message = parse_message(value.clone())?;
    Ok(build_history(&message))
}
