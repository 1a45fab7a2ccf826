//! Error taxonomy for the version history manager.
//!
//! Library code returns [`HistoryError`]; the CLI wraps it in `anyhow` with
//! context. Variants carry technical detail for logs, while
//! [`HistoryError::user_message`] gives the generic text shown to end users.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// A history record could not be parsed (missing content, bad timestamp, wrong shape).
    #[error("malformed history record at position {position}: {reason}")]
    MalformedHistory { position: usize, reason: String },

    /// A message document failed validation outside its history records.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// Restore or comparison addressed a version that does not exist.
    #[error("invalid version index {index} (sequence has {available} entries)")]
    InvalidVersion { index: usize, available: usize },

    #[error("conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("message not found: {0}")]
    MessageNotFound(String),

    /// The store could not be read or its content failed validation.
    #[error("failed to load conversation store: {0}")]
    StoreLoad(String),

    /// The write-back to the store failed. Nothing was committed.
    #[error("failed to write to conversation store: {0}")]
    StoreWrite(String),
}

pub type HistoryResult<T> = Result<T, HistoryError>;

impl HistoryError {
    /// Generic, non-technical message suitable for display to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            HistoryError::MalformedHistory { .. } | HistoryError::MalformedMessage(_) => {
                "This message's edit history could not be read."
            }
            HistoryError::InvalidVersion { .. } => "That version is not available.",
            HistoryError::ConversationNotFound(_) => "Conversation not found.",
            HistoryError::MessageNotFound(_) => "Message not found.",
            HistoryError::StoreLoad(_) => "Conversations could not be loaded.",
            HistoryError::StoreWrite(_) => "Failed to restore version. Please try again.",
        }
    }

    /// Whether the user can reasonably retry the same operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, HistoryError::StoreWrite(_) | HistoryError::StoreLoad(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = HistoryError::MalformedHistory { position: 2, reason: "missing content".into() };
        assert_eq!(err.to_string(), "malformed history record at position 2: missing content");

        let err = HistoryError::InvalidVersion { index: 4, available: 2 };
        assert!(err.to_string().contains("index 4"));
        assert!(err.to_string().contains("2 entries"));
    }

    #[test]
    fn test_user_message_hides_detail() {
        let err = HistoryError::StoreWrite("connection reset by peer".into());
        assert!(!err.user_message().contains("connection reset"));
        assert!(err.is_retryable());

        let err = HistoryError::InvalidVersion { index: 0, available: 1 };
        assert!(!err.is_retryable());
    }
}
