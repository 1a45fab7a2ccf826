use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::message::parse_message;
use crate::error::{HistoryError, HistoryResult};
use crate::models::ConversationState;

/// On-disk layout of a conversation store file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub conversations: Vec<ConversationState>,
}

/// Parse a store document, validating every message at the boundary.
///
/// The first invalid message fails the whole load; nothing is skipped.
pub fn parse_store_document(json: &str) -> HistoryResult<Vec<ConversationState>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    let root: Value =
        serde_json::from_str(json).map_err(|e| HistoryError::StoreLoad(e.to_string()))?;

    let raw_conversations = match root.get("conversations") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(HistoryError::StoreLoad("conversations must be an array".into())),
    };

    let mut conversations = Vec::with_capacity(raw_conversations.len());
    for raw in raw_conversations {
        conversations.push(parse_conversation(raw)?);
    }

    debug!(count = conversations.len(), "Parsed conversation store");
    Ok(conversations)
}

fn parse_conversation(raw: &Value) -> HistoryResult<ConversationState> {
    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| HistoryError::StoreLoad("conversation is missing an id".into()))?;

    let mut conversation = ConversationState::new(id);
    conversation.title = raw.get("title").and_then(Value::as_str).map(str::to_string);

    let raw_messages = match raw.get("messages") {
        None | Some(Value::Null) => return Ok(conversation),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(HistoryError::StoreLoad(format!(
                "messages of conversation {} must be an array",
                id
            )));
        }
    };

    for raw_message in raw_messages {
        let message = parse_message(raw_message.clone()).inspect_err(|e| {
            let message_id = raw_message.get("id").and_then(Value::as_str).unwrap_or("<unknown>");
            warn!(conversation = id, message = message_id, error = %e, "Invalid message in store");
        })?;

        if message.conversation_id != id {
            return Err(HistoryError::MalformedMessage(format!(
                "message {} belongs to conversation {} but is stored under {}",
                message.id, message.conversation_id, id
            )));
        }
        conversation.messages.push(message);
    }

    Ok(conversation)
}

/// Serialize conversations back into the store layout
pub fn to_store_document(conversations: &[ConversationState]) -> HistoryResult<String> {
    let document = StoreDocument { conversations: conversations.to_vec() };
    serde_json::to_string_pretty(&document).map_err(|e| HistoryError::StoreWrite(e.to_string()))
}
