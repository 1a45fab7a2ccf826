//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a conversation store file inside a temp directory
pub struct StoreBuilder {
    temp_dir: TempDir,
    conversations: Vec<Value>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, conversations: Vec::new() }
    }

    /// Add a conversation holding the given messages
    pub fn with_conversation(mut self, id: &str, messages: &[MessageBuilder]) -> Self {
        let messages: Vec<Value> = messages.iter().map(|m| m.to_value(id)).collect();
        self.conversations.push(json!({ "id": id, "title": format!("Conversation {}", id), "messages": messages }));
        self
    }

    /// Write the store and return the temp dir plus the store path
    pub fn build(self) -> (TempDir, PathBuf) {
        let path = self.temp_dir.path().join("conversations.json");
        let document = json!({ "conversations": self.conversations });
        fs::write(&path, serde_json::to_string_pretty(&document).unwrap())
            .expect("Failed to write store");
        (self.temp_dir, path)
    }

    /// Write raw text as the store file
    pub fn build_raw(self, content: &str) -> (TempDir, PathBuf) {
        let path = self.temp_dir.path().join("conversations.json");
        fs::write(&path, content).expect("Failed to write store");
        (self.temp_dir, path)
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for message documents in the chat front end's JSON shape
#[derive(Clone)]
pub struct MessageBuilder {
    id: String,
    role: String,
    content: String,
    timestamp: Value,
    edited_at: Option<Value>,
    history: Option<Vec<Value>>,
}

impl MessageBuilder {
    pub fn user(id: &str) -> Self {
        Self {
            id: id.to_string(),
            role: "user".to_string(),
            content: "Test message".to_string(),
            timestamp: json!("2024-01-01T00:00:00Z"),
            edited_at: None,
            history: None,
        }
    }

    pub fn assistant(id: &str) -> Self {
        Self { role: "assistant".to_string(), ..Self::user(id) }
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn edited_at(mut self, edited_at: &str) -> Self {
        self.edited_at = Some(json!(edited_at));
        self
    }

    /// Append an earlier version (call most recent first)
    pub fn earlier(mut self, content: &str, edited_at: &str) -> Self {
        self.history
            .get_or_insert_with(Vec::new)
            .push(json!({ "content": content, "editedAt": edited_at }));
        self
    }

    /// Append a raw history record, valid or not
    pub fn raw_record(mut self, record: Value) -> Self {
        self.history.get_or_insert_with(Vec::new).push(record);
        self
    }

    pub fn to_value(&self, conversation_id: &str) -> Value {
        let mut value = json!({
            "id": self.id,
            "conversationId": conversation_id,
            "role": self.role,
            "content": self.content,
            "timestamp": self.timestamp,
        });
        if let Some(edited_at) = &self.edited_at {
            value["editedAt"] = edited_at.clone();
            value["isEdited"] = json!(true);
        }
        if let Some(history) = &self.history {
            value["metadata"] = json!({ "history": history });
        }
        value
    }
}

/// The worked example: "Hello world" with one earlier version "Hello"
pub fn hello_world_store() -> (TempDir, PathBuf) {
    StoreBuilder::new()
        .with_conversation(
            "c1",
            &[MessageBuilder::user("m1")
                .content("Hello world")
                .edited_at("2024-01-02T00:00:00Z")
                .earlier("Hello", "2024-01-01T00:00:00Z")],
        )
        .build()
}

/// Store with one message carrying three earlier versions plus an unedited reply
pub fn multi_version_store() -> (TempDir, PathBuf) {
    StoreBuilder::new()
        .with_conversation(
            "c1",
            &[
                MessageBuilder::user("m1")
                    .content("Version four")
                    .edited_at("2024-01-04T00:00:00Z")
                    .earlier("Version three", "2024-01-03T00:00:00Z")
                    .earlier("Version two", "2024-01-02T00:00:00Z")
                    .earlier("Version one", "2024-01-01T00:00:00Z"),
                MessageBuilder::assistant("m2").content("A reply"),
            ],
        )
        .build()
}

pub fn read_store(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("Failed to read store"))
        .expect("Store is not valid JSON")
}
