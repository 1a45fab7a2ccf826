use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One prior version of a message as stored in `metadata.history`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub content: String,
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_timestamp")]
    pub edited_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(content: impl Into<String>, edited_at: DateTime<Utc>) -> Self {
        Self { content: content.into(), edited_at }
    }
}

/// Ordered prior versions. Position 0 is the most recent prior version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistorySequence(Vec<HistoryRecord>);

impl HistorySequence {
    pub fn new(records: Vec<HistoryRecord>) -> Self {
        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.0
    }

    /// Insert a record as the most recent prior version
    pub fn push_front(&mut self, record: HistoryRecord) {
        self.0.insert(0, record);
    }
}

impl From<Vec<HistoryRecord>> for HistorySequence {
    fn from(records: Vec<HistoryRecord>) -> Self {
        Self(records)
    }
}

/// Message metadata. `history` is typed; every other key is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<HistorySequence>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MessageMetadata {
    pub fn is_empty(&self) -> bool {
        self.history.is_none() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub content: String,
    pub role: Role,
    #[serde(
        alias = "createdAt",
        deserialize_with = "crate::parsers::deserializers::deserialize_timestamp"
    )]
    pub timestamp: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_timestamp"
    )]
    pub edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_edited: bool,
    #[serde(
        default,
        skip_serializing_if = "MessageMetadata::is_empty",
        deserialize_with = "crate::parsers::deserializers::deserialize_metadata"
    )]
    pub metadata: MessageMetadata,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        conversation_id: impl Into<String>,
        role: Role,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            conversation_id: conversation_id.into(),
            content: content.into(),
            role,
            timestamp,
            edited_at: None,
            is_edited: false,
            metadata: MessageMetadata::default(),
        }
    }

    /// Time the current content was produced: last edit, or creation
    pub fn effective_edited_at(&self) -> DateTime<Utc> {
        self.edited_at.unwrap_or(self.timestamp)
    }

    /// Prior versions, most recent first. Empty when the message was never edited.
    pub fn history(&self) -> &[HistoryRecord] {
        self.metadata.history.as_ref().map(HistorySequence::records).unwrap_or(&[])
    }

    pub fn has_history(&self) -> bool {
        !self.history().is_empty()
    }

    pub fn with_history(mut self, records: Vec<HistoryRecord>) -> Self {
        self.metadata.history = Some(HistorySequence::new(records));
        self
    }

    pub fn with_edited_at(mut self, edited_at: DateTime<Utc>) -> Self {
        self.edited_at = Some(edited_at);
        self.is_edited = true;
        self
    }
}
