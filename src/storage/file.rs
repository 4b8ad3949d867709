// ABOUTME: JSON-file key/value store persisted under the user's data directory
// ABOUTME: Whole-file read/modify/write with atomic rename
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::KeyValueStore;
use crate::errors::{AppError, AppResult};

/// Store holding one JSON object (`key -> value`) in a single file
///
/// Writes inside one process are serialized; concurrent processes follow
/// last-write-wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Store backed by `path`; the file is created on first write
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> AppResult<Map<String, Value>> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                ))
                .with_source(e))
            }
        };
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }
        match serde_json::from_slice(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(AppError::parse(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    async fn write_all(&self, map: &Map<String, Value>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), keys = map.len(), "Store file written");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_all().await?;
        map.insert(key.to_owned(), value);
        self.write_all(&map).await
    }

    async fn remove(&self, key: &str) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_all().await?;
        if map.remove(key).is_none() {
            return Ok(false);
        }
        self.write_all(&map).await?;
        Ok(true)
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        let mut keys: Vec<String> = self.read_all().await?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
