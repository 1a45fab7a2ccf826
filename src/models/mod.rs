//! Data models for message version history.
//!
//! - [`Message`] - A chat message with its embedded edit history
//! - [`HistorySequence`] / [`HistoryRecord`] - Typed `metadata.history`
//! - [`VersionEntry`] - One snapshot in a derived version sequence
//! - [`ConversationState`] - A conversation as returned by a store
//!
//! Timestamps go through the custom deserializers in `parsers::deserializers`,
//! which accept RFC 3339 strings and Unix milliseconds.

pub mod conversation;
pub mod message;
pub mod version;

pub use conversation::ConversationState;
pub use message::{HistoryRecord, HistorySequence, Message, MessageMetadata, Role};
pub use version::{VersionEntry, display_number};
