use chrono::{DateTime, Utc};
use rand::Rng;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::types::{Message, MessageDraft, MessagePatch, MessageStatus};
use crate::error::StorageError;

/// File name of the single stored collection
pub const STORAGE_KEY: &str = "portfolio_contact_messages.json";

/// JSON-file store holding the ordered message list (newest first).
///
/// Every call re-reads the file, so writes from other processes are picked
/// up on the next read. Writes are last-write-wins.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Store living at `dir/portfolio_contact_messages.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORAGE_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored message, or an empty list if the file is missing or unreadable
    pub fn get_all(&self) -> Vec<Message> {
        match self.read() {
            Ok(messages) => messages,
            Err(e) => {
                log::error!("Error reading {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    fn read(&self) -> Result<Vec<Message>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(&self.path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Overwrite the stored list. Returns false if the write failed.
    pub fn save_all(&self, messages: &[Message]) -> bool {
        match self.write(messages) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error saving {}: {}", self.path.display(), e);
                false
            }
        }
    }

    /// Write to a sibling temp file, then rename it over the store so
    /// readers only ever see a complete list.
    fn write(&self, messages: &[Message]) -> Result<(), StorageError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(parent)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file_mut());
            serde_json::to_writer(&mut writer, messages)?;
            writer.flush()?;
        }
        temp_file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Prepend a new unread message built from `draft`
    pub fn add(&self, draft: &MessageDraft) -> Option<Message> {
        self.add_at(draft, Utc::now())
    }

    pub fn add_at(&self, draft: &MessageDraft, now: DateTime<Utc>) -> Option<Message> {
        let mut messages = self.get_all();
        let mut id = generate_id(now);
        while messages.iter().any(|m| m.id == id) {
            id = generate_id(now);
        }

        let message = Message {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            message: draft.message.clone(),
            status: MessageStatus::Unread,
            created_at: now,
        };
        messages.insert(0, message.clone());

        if self.save_all(&messages) {
            log::debug!("Stored message {} locally", message.id);
            Some(message)
        } else {
            None
        }
    }

    /// Merge `patch` into the first message with `id`
    pub fn update(&self, id: &str, patch: &MessagePatch) -> Option<Message> {
        let mut messages = self.get_all();
        let msg = messages.iter_mut().find(|m| m.id == id)?;
        patch.apply(msg);
        let updated = msg.clone();
        // Saving failures are logged; the merged record is still returned.
        self.save_all(&messages);
        Some(updated)
    }

    /// Remove the message with `id`. False if it was not stored or saving failed.
    pub fn remove(&self, id: &str) -> bool {
        let mut messages = self.get_all();
        let before = messages.len();
        messages.retain(|m| m.id != id);
        if messages.len() == before {
            return false;
        }
        self.save_all(&messages)
    }

    /// Modification time of the backing file
    pub fn modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }
}

/// Watches the store file for writes made outside this process
#[derive(Debug, Default)]
pub struct StoreWatcher {
    last_seen: Option<SystemTime>,
}

impl StoreWatcher {
    pub fn new(store: &LocalStore) -> Self {
        Self {
            last_seen: store.modified(),
        }
    }

    /// Returns true if the file changed since the last poll
    pub fn poll(&mut self, store: &LocalStore) -> bool {
        let current = store.modified();
        if current != self.last_seen {
            self.last_seen = current;
            return true;
        }
        false
    }

    /// Accept the current file state as seen (after our own writes)
    pub fn sync(&mut self, store: &LocalStore) {
        self.last_seen = store.modified();
    }
}

/// `base36(millis) + base36(random)`
fn generate_id(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().max(0) as u64;
    let random: u64 = rand::thread_rng().r#gen();
    format!("{}{}", to_base36(millis), to_base36(random))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}
