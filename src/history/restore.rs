use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{HistoryError, HistoryResult};
use crate::models::{HistoryRecord, Message};

/// What happens to the overwritten current content on restore
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestorePolicy {
    /// Push the overwritten content onto the front of the history so it stays recoverable
    #[default]
    PreserveCurrent,
    /// Leave the history untouched; the overwritten content is gone
    Overwrite,
}

impl FromStr for RestorePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" | "preserve-current" => Ok(RestorePolicy::PreserveCurrent),
            "overwrite" => Ok(RestorePolicy::Overwrite),
            other => Err(format!("unknown restore policy '{}' (expected preserve or overwrite)", other)),
        }
    }
}

impl fmt::Display for RestorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestorePolicy::PreserveCurrent => write!(f, "preserve"),
            RestorePolicy::Overwrite => write!(f, "overwrite"),
        }
    }
}

/// Restore `message` to the version at `target_index`, stamped with the current time.
///
/// See [`restore_at`].
pub fn restore(message: &Message, target_index: usize) -> HistoryResult<Message> {
    restore_at(message, target_index, Utc::now())
}

/// Restore `message` to the version at `target_index` of its version sequence.
///
/// Valid indices are `1..len`; index 0 is the current content and is rejected
/// along with anything past the oldest version. The returned message differs
/// from the input only in `content`, `is_edited` and `edited_at`, and
/// `metadata.history` is left as is. `edited_at` is always later than the
/// message's previous edit time, even if `now` is not.
pub fn restore_at(
    message: &Message,
    target_index: usize,
    now: DateTime<Utc>,
) -> HistoryResult<Message> {
    check_target(message, target_index)?;

    let target = &message.history()[target_index - 1];
    let previous = message.effective_edited_at();
    let edited_at = if now > previous { now } else { previous + Duration::milliseconds(1) };

    let mut restored = message.clone();
    restored.content = target.content.clone();
    restored.is_edited = true;
    restored.edited_at = Some(edited_at);
    Ok(restored)
}

/// Fail with `InvalidVersion` unless `target_index` names a restorable version
pub fn check_target(message: &Message, target_index: usize) -> HistoryResult<()> {
    let available = message.history().len() + 1;

    if target_index == 0 || target_index >= available {
        warn!(message = %message.id, target_index, available, "Rejected restore to invalid version");
        return Err(HistoryError::InvalidVersion { index: target_index, available });
    }
    Ok(())
}

/// Restore and then apply `policy` to the history of the result
pub fn restore_with_policy(
    message: &Message,
    target_index: usize,
    policy: RestorePolicy,
    now: DateTime<Utc>,
) -> HistoryResult<Message> {
    let mut restored = restore_at(message, target_index, now)?;

    if policy == RestorePolicy::PreserveCurrent {
        restored
            .metadata
            .history
            .get_or_insert_default()
            .push_front(HistoryRecord::new(message.content.clone(), message.effective_edited_at()));
    }

    Ok(restored)
}
