//! Key-value persistence for the repository snapshot.
//!
//! Three independent records are kept: the user list, the project list (with
//! embedded tasks) and the current user. Backends only move strings around;
//! the typed helpers below handle JSON and swallow failures after logging
//! them, so persistence problems never take down the running session.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{AppError, AppResult};

pub mod keys {
    pub const USERS: &str = "tm_users";
    pub const PROJECTS: &str = "tm_projects";
    pub const CURRENT_USER: &str = "tm_current_user";
}

pub trait Storage: Send + Sync {
    /// Raw value under `key`, or `None` when nothing is stored.
    fn read(&self, key: &str) -> AppResult<Option<String>>;

    fn write(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Decodes `key`, falling back to `fallback` when it is absent or unreadable.
pub fn get_item<T: DeserializeOwned>(storage: &dyn Storage, key: &str, fallback: T) -> T {
    match try_get_item(storage, key) {
        Ok(Some(value)) => value,
        Ok(None) => fallback,
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "failed to read stored record, using fallback");
            fallback
        }
    }
}

pub fn try_get_item<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> AppResult<Option<T>> {
    let Some(raw) = storage.read(key)? else {
        return Ok(None);
    };

    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        AppError::storage(format!("{key}: invalid value at {}: {}", err.path(), err.inner()))
    })?;
    deserializer
        .end()
        .map_err(|err| AppError::storage(format!("{key}: trailing data: {err}")))?;
    Ok(Some(value))
}

/// Encodes and writes `value`. Returns whether the write went through.
pub fn set_item<T: Serialize + ?Sized>(storage: &dyn Storage, key: &str, value: &T) -> bool {
    let result = serde_json::to_string(value)
        .map_err(AppError::from)
        .and_then(|raw| storage.write(key, &raw));

    if let Err(err) = result {
        tracing::error!(key = %key, error = %err, "failed to persist record");
        return false;
    }
    true
}

pub fn remove_item(storage: &dyn Storage, key: &str) -> bool {
    if let Err(err) = storage.remove(key) {
        tracing::error!(key = %key, error = %err, "failed to remove record");
        return false;
    }
    true
}
