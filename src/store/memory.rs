use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::ConversationStore;
use crate::error::{HistoryError, HistoryResult};
use crate::models::{ConversationState, Message};

/// Process-local conversation store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    conversations: RwLock<HashMap<String, ConversationState>>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conversations(conversations: impl IntoIterator<Item = ConversationState>) -> Self {
        let map = conversations.into_iter().map(|c| (c.id.clone(), c)).collect();
        Self { conversations: RwLock::new(map), fail_writes: AtomicBool::new(false) }
    }

    pub async fn insert(&self, conversation: ConversationState) {
        self.conversations.write().await.insert(conversation.id.clone(), conversation);
    }

    /// Make every subsequent `update_message` fail with `StoreWrite`
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConversationStore for InMemoryStore {
    async fn get(&self, conversation_id: &str) -> HistoryResult<ConversationState> {
        self.conversations
            .read()
            .await
            .get(conversation_id)
            .cloned()
            .ok_or_else(|| HistoryError::ConversationNotFound(conversation_id.to_string()))
    }

    async fn update_message(&self, message: &Message) -> HistoryResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            warn!(message = %message.id, "Rejecting write: store is failing writes");
            return Err(HistoryError::StoreWrite("store rejected the write".into()));
        }

        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .get_mut(&message.conversation_id)
            .ok_or_else(|| HistoryError::ConversationNotFound(message.conversation_id.clone()))?;
        let slot = conversation
            .message_mut(&message.id)
            .ok_or_else(|| HistoryError::MessageNotFound(message.id.clone()))?;
        *slot = message.clone();

        info!(conversation = %message.conversation_id, message = %message.id, "Updated message");
        Ok(())
    }

    async fn list(&self) -> HistoryResult<Vec<ConversationState>> {
        let mut conversations: Vec<_> = self.conversations.read().await.values().cloned().collect();
        conversations.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(conversations)
    }
}
