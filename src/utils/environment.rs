use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable naming the store file
pub const STORE_ENV: &str = "MESSAGE_HISTORY_STORE";
/// Environment variable selecting the restore policy
pub const POLICY_ENV: &str = "MESSAGE_HISTORY_POLICY";
/// Environment variable holding the log filter
pub const LOG_ENV: &str = "MESSAGE_HISTORY_LOG";

const STORE_FILENAME: &str = "conversations.json";

/// Default store location: `<data dir>/message-history/conversations.json`
pub fn default_store_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(data_dir.join("message-history").join(STORE_FILENAME))
}

/// Store path from `MESSAGE_HISTORY_STORE`, falling back to the default location
pub fn get_store_path() -> Result<PathBuf> {
    match env::var(STORE_ENV) {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => default_store_path(),
    }
}
