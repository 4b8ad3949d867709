// ABOUTME: Body-analysis tracker storing named photo analyses
// ABOUTME: Add, list, fetch and delete saved analyses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{BodyAnalysis, Validate};
use crate::storage::TrackerStore;

/// Analysis screen operations
#[derive(Clone)]
pub struct AnalysisTracker {
    store: TrackerStore,
}

impl AnalysisTracker {
    /// Create the tracker
    #[must_use]
    pub const fn new(store: TrackerStore) -> Self {
        Self { store }
    }

    /// All saved analyses in saving order
    ///
    /// # Errors
    ///
    /// Returns an error if the stored list cannot be read
    pub async fn list(&self) -> AppResult<Vec<BodyAnalysis>> {
        self.store.load_analyses().await
    }

    /// Save a new analysis
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid analysis, or a storage error
    pub async fn add(&self, analysis: BodyAnalysis) -> AppResult<BodyAnalysis> {
        analysis.validate()?;
        let mut analyses = self.list().await?;
        analyses.push(analysis.clone());
        self.store.save_analyses(&analyses).await?;
        Ok(analysis)
    }

    /// Fetch one analysis
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no analysis has that id
    pub async fn get(&self, id: Uuid) -> AppResult<BodyAnalysis> {
        self.list()
            .await?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found(format!("Analysis {id}")))
    }

    /// Delete one analysis
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no analysis has that id
    pub async fn delete(&self, id: Uuid) -> AppResult<BodyAnalysis> {
        let mut analyses = self.list().await?;
        let index = analyses
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AppError::not_found(format!("Analysis {id}")))?;
        let removed = analyses.remove(index);
        self.store.save_analyses(&analyses).await?;
        Ok(removed)
    }
}
