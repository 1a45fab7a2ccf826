//! Message History - Browse, compare and restore the edit history of chat messages
//!
//! A chat message carries its current content plus the earlier versions it
//! replaced. This library:
//!
//! - Derives an ordered version sequence from a message (current first, then older)
//! - Compares the current version with an earlier one, clamping stale selections
//! - Restores an earlier version as the new current content after confirmation
//! - Writes the restored message back through an injected [`ConversationStore`]
//!
//! # Example
//!
//! ```
//! use message_history::{build_history, parse_message_str, restore};
//!
//! let message = parse_message_str(r#"{
//!     "id": "m1", "conversationId": "c1", "role": "user",
//!     "content": "Hello world", "timestamp": "2024-01-01T00:00:00Z",
//!     "metadata": {"history": [{"content": "Hello", "editedAt": "2024-01-01T00:00:00Z"}]}
//! }"#)?;
//!
//! let versions = build_history(&message);
//! assert_eq!(versions.len(), 2);
//!
//! let restored = restore(&message, 1)?;
//! assert_eq!(restored.content, "Hello");
//! assert!(restored.is_edited);
//! # Ok::<(), message_history::HistoryError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod parsers;
pub mod service;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use error::{HistoryError, HistoryResult};
pub use history::{
    ComparisonSelector, RestorePolicy, VersionComparison, ViewMode, ViewState, build_history,
    build_history_from_value, restore, restore_at,
};
pub use models::{ConversationState, HistoryRecord, Message, Role, VersionEntry};
pub use parsers::{parse_message, parse_message_str};
pub use service::{AlwaysConfirm, ConfirmRestore, HistoryService, RestoreOutcome};
pub use store::{ConversationStore, InMemoryStore, JsonFileStore};
