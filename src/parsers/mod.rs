//! JSON parsers for messages and conversation store documents
//!
//! # Error Handling Strategy
//!
//! Parsing is **fail-fast** at the store boundary:
//!
//! - **History records**: A record with missing or non-string `content`, a missing
//!   `editedAt`, or an unparseable timestamp fails the message with
//!   [`HistoryError::MalformedHistory`](crate::error::HistoryError::MalformedHistory),
//!   naming the record position. Records are never skipped.
//!
//! - **Typed after validation**: Once a document passes validation it is deserialized
//!   into [`Message`](crate::models::Message), whose `metadata.history` is a typed
//!   field. Nothing downstream re-parses untyped metadata.
//!
//! - **Timestamps**: Both RFC 3339 strings and Unix milliseconds are accepted.

pub mod conversation;
pub mod deserializers;
pub mod message;

pub use conversation::{parse_store_document, to_store_document};
pub use message::{parse_message, parse_message_str, validate_history};
