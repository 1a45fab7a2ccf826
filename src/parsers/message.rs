use serde_json::Value;
use tracing::warn;

use super::deserializers::parse_timestamp_value;
use crate::error::{HistoryError, HistoryResult};
use crate::models::Message;

/// Check `metadata.history` of a raw message document record by record.
///
/// The error names the position of the first invalid record.
pub fn validate_history(value: &Value) -> HistoryResult<()> {
    let metadata = match value.get("metadata") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(HistoryError::MalformedMessage("metadata must be an object".into())),
    };

    let records = match metadata.get("history") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(records)) => records,
        Some(_) => {
            return Err(HistoryError::MalformedHistory {
                position: 0,
                reason: "history must be a sequence of records".into(),
            });
        }
    };

    for (position, record) in records.iter().enumerate() {
        if let Err(reason) = validate_record(record) {
            warn!(position, %reason, "Rejecting malformed history record");
            return Err(HistoryError::MalformedHistory { position, reason });
        }
    }

    Ok(())
}

fn validate_record(record: &Value) -> Result<(), String> {
    let fields = record.as_object().ok_or_else(|| "record must be an object".to_string())?;

    match fields.get("content") {
        Some(Value::String(_)) => {}
        Some(_) => return Err("content must be a string".into()),
        None => return Err("missing content".into()),
    }

    let edited_at = fields.get("editedAt").ok_or_else(|| "missing editedAt".to_string())?;
    parse_timestamp_value(edited_at)?;

    Ok(())
}

/// Parse and validate a raw message document
pub fn parse_message(value: Value) -> HistoryResult<Message> {
    validate_history(&value)?;
    serde_json::from_value(value).map_err(|e| HistoryError::MalformedMessage(e.to_string()))
}

/// Parse and validate a message from JSON text
pub fn parse_message_str(json: &str) -> HistoryResult<Message> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| HistoryError::MalformedMessage(e.to_string()))?;
    parse_message(value)
}
