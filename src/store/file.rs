//! Conversation store backed by one JSON document on disk.
//!
//! The whole document is loaded and validated on open. Writes serialize the
//! updated document to a temp file and rename it over the original, so a
//! failed write leaves both the file and the in-memory copy unchanged.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{ConversationStore, replace_message};
use crate::error::{HistoryError, HistoryResult};
use crate::models::{ConversationState, Message};
use crate::parsers::{parse_store_document, to_store_document};

/// Maximum store file size (50MB)
const MAX_STORE_SIZE_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    conversations: RwLock<Vec<ConversationState>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> HistoryResult<Self> {
        let path = path.into();
        let conversations = load_document(&path).await?;
        debug!(path = %path.display(), conversations = conversations.len(), "Opened store");
        Ok(Self { path, conversations: RwLock::new(conversations) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add or replace a whole conversation and persist
    pub async fn upsert_conversation(&self, conversation: ConversationState) -> HistoryResult<()> {
        let mut guard = self.conversations.write().await;
        let mut updated = guard.clone();
        match updated.iter_mut().find(|c| c.id == conversation.id) {
            Some(existing) => *existing = conversation,
            None => updated.push(conversation),
        }
        updated.sort_by(|a, b| a.id.cmp(&b.id));

        write_document(&self.path, &updated).await?;
        *guard = updated;
        Ok(())
    }
}

#[async_trait]
impl ConversationStore for JsonFileStore {
    async fn get(&self, conversation_id: &str) -> HistoryResult<ConversationState> {
        self.conversations
            .read()
            .await
            .iter()
            .find(|c| c.id == conversation_id)
            .cloned()
            .ok_or_else(|| HistoryError::ConversationNotFound(conversation_id.to_string()))
    }

    async fn update_message(&self, message: &Message) -> HistoryResult<()> {
        let mut guard = self.conversations.write().await;
        let mut updated = guard.clone();
        replace_message(&mut updated, message)?;

        write_document(&self.path, &updated).await.inspect_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Store write failed");
        })?;
        *guard = updated;

        info!(conversation = %message.conversation_id, message = %message.id, "Persisted message");
        Ok(())
    }

    async fn list(&self) -> HistoryResult<Vec<ConversationState>> {
        let mut conversations = self.conversations.read().await.clone();
        conversations.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(conversations)
    }
}

async fn load_document(path: &Path) -> HistoryResult<Vec<ConversationState>> {
    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(HistoryError::StoreLoad(format!("{}: {}", path.display(), e)));
        }
    };

    if metadata.len() > MAX_STORE_SIZE_BYTES {
        return Err(HistoryError::StoreLoad(format!(
            "store file too large: {} ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_STORE_SIZE_BYTES
        )));
    }

    let json = fs::read_to_string(path)
        .await
        .map_err(|e| HistoryError::StoreLoad(format!("{}: {}", path.display(), e)))?;
    parse_store_document(&json)
}

/// Write atomically (temp file + rename)
async fn write_document(path: &Path, conversations: &[ConversationState]) -> HistoryResult<()> {
    let json = to_store_document(conversations)?;
    let write_err = |e: std::io::Error| HistoryError::StoreWrite(format!("{}: {}", path.display(), e));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let temp_path = path.with_file_name(format!("{}.tmp", file_name));
    fs::write(&temp_path, json).await.map_err(write_err)?;

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(write_err(e));
    }
    Ok(())
}
