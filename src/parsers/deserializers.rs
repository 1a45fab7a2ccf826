use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::MessageMetadata;

/// Interpret a JSON value as a timestamp: integer Unix milliseconds or an RFC 3339 string
pub fn parse_timestamp_value(value: &Value) -> Result<DateTime<Utc>, String> {
    match value {
        Value::Number(n) => {
            let ms = n.as_i64().ok_or_else(|| "invalid timestamp".to_string())?;
            DateTime::from_timestamp_millis(ms).ok_or_else(|| "timestamp out of range".to_string())
        }
        Value::String(s) => s
            .parse::<DateTime<Utc>>()
            .map_err(|e| format!("invalid RFC3339 timestamp '{}': {}", s, e)),
        _ => Err("timestamp must be a number or string".to_string()),
    }
}

/// Custom deserializer for timestamps that accepts both integers (ms) and RFC3339 strings
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_timestamp_value(&value).map_err(Error::custom)
}

/// Like [`deserialize_timestamp`], with `null` mapping to `None`
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => parse_timestamp_value(&value).map(Some).map_err(Error::custom),
    }
}

/// Metadata may be missing or explicitly `null`; both mean "no metadata"
pub fn deserialize_metadata<'de, D>(deserializer: D) -> Result<MessageMetadata, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<MessageMetadata>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::HistoryRecord;

    #[test]
    fn test_timestamp_integer_millis() {
        let ts = parse_timestamp_value(&json!(1762076480016_i64)).unwrap();
        assert_eq!(ts, DateTime::from_timestamp_millis(1762076480016).unwrap());
    }

    #[test]
    fn test_timestamp_rfc3339() {
        let ts = parse_timestamp_value(&json!("2025-11-02T09:41:20.016Z")).unwrap();
        assert_eq!(ts.timestamp_millis(), 1762076480016);
    }

    #[test]
    fn test_timestamp_rejects_other_shapes() {
        assert!(parse_timestamp_value(&json!(true)).is_err());
        assert!(parse_timestamp_value(&json!("yesterday")).is_err());
        assert!(parse_timestamp_value(&json!(1.5)).is_err());
    }

    #[test]
    fn test_history_record_accepts_both_formats() {
        let record: HistoryRecord =
            serde_json::from_value(json!({"content": "a", "editedAt": 1704067200000_i64}))
                .unwrap();
        let same: HistoryRecord =
            serde_json::from_value(json!({"content": "a", "editedAt": "2024-01-01T00:00:00Z"}))
                .unwrap();
        assert_eq!(record, same);
    }
}
