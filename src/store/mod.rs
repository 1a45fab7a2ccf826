//! Conversation store contract and implementations.
//!
//! The version history manager never owns persistence. It reads conversations
//! through [`ConversationStore::get`] and submits restored messages through
//! [`ConversationStore::update_message`]. Implementations own their locking.
//!
//! - [`InMemoryStore`] - process-local map, used by tests and embedders
//! - [`JsonFileStore`] - single JSON document on disk with atomic writes

pub mod file;
pub mod memory;

use async_trait::async_trait;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

use crate::error::{HistoryError, HistoryResult};
use crate::models::{ConversationState, Message};

#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Fetch a conversation. Fails with `ConversationNotFound` when missing.
    async fn get(&self, conversation_id: &str) -> HistoryResult<ConversationState>;

    /// Replace a stored message with `message`, matched by conversation and id.
    ///
    /// Fails with `StoreWrite` if the write does not go through; in that case
    /// the stored message is unchanged.
    async fn update_message(&self, message: &Message) -> HistoryResult<()>;

    /// All conversations, ordered by id
    async fn list(&self) -> HistoryResult<Vec<ConversationState>>;

    /// Fetch one message of a conversation
    async fn get_message(&self, conversation_id: &str, message_id: &str) -> HistoryResult<Message> {
        let conversation = self.get(conversation_id).await?;
        conversation
            .message(message_id)
            .cloned()
            .ok_or_else(|| HistoryError::MessageNotFound(message_id.to_string()))
    }
}

/// Replace the message in `conversations` that matches `message`
pub(crate) fn replace_message(
    conversations: &mut [ConversationState],
    message: &Message,
) -> HistoryResult<()> {
    let conversation = conversations
        .iter_mut()
        .find(|c| c.id == message.conversation_id)
        .ok_or_else(|| HistoryError::ConversationNotFound(message.conversation_id.clone()))?;

    let slot = conversation
        .message_mut(&message.id)
        .ok_or_else(|| HistoryError::MessageNotFound(message.id.clone()))?;
    *slot = message.clone();
    Ok(())
}
