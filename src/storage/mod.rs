// ABOUTME: Key/value persistence abstraction with pluggable backends
// ABOUTME: In-memory and JSON-file stores behind one async trait, plus typed tracker access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Storage
//!
//! Every screen of the tracker persists flat JSON values under fixed keys.
//! [`KeyValueStore`] is the raw namespace; [`TrackerStore`] layers typed,
//! validated and versioned access on top of it.

/// Versioned `{version, data}` wrapper for stored values
pub mod envelope;
/// JSON file backend
pub mod file;
/// In-memory backend
pub mod memory;
/// Typed load/save for every tracker entity
pub mod tracker_store;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::environment::StorageConfig;
use crate::errors::AppResult;

pub use file::FileStore;
pub use memory::InMemoryStore;
pub use tracker_store::{or_missing, TrackerStore};

/// Raw key/value namespace shared by all screens
///
/// Implementations must be safe to share between tasks; last write wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Short backend identifier used in logs
    fn backend_name(&self) -> &'static str;

    /// Read a value
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read
    async fn get(&self, key: &str) -> AppResult<Option<Value>>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be written
    async fn set(&self, key: &str, value: Value) -> AppResult<()>;

    /// Delete a value, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be written
    async fn remove(&self, key: &str) -> AppResult<bool>;

    /// All keys currently present, sorted
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read
    async fn keys(&self) -> AppResult<Vec<String>>;
}

/// Open the file store configured for this installation
#[must_use]
pub fn open_store(config: &StorageConfig) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::new(config.store_path()))
}
