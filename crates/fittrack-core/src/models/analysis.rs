// ABOUTME: Saved body-composition analysis model
// ABOUTME: Named analysis with focus areas and a base64-encoded photo
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ensure_not_blank, Validate};
use crate::errors::{AppError, AppResult};

/// A body analysis saved from the analysis screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyAnalysis {
    /// Identifier used for lookup and deletion
    pub id: Uuid,
    /// User-chosen label
    pub name: String,
    /// Body areas the analysis covers (e.g. "abs", "arms")
    pub areas: Vec<String>,
    /// Day the analysis was saved
    pub date: NaiveDate,
    /// Photo as standard base64, optionally with a `data:<mime>;base64,` prefix
    pub image: String,
}

impl BodyAnalysis {
    /// Create an analysis from raw image bytes
    #[must_use]
    pub fn new(name: impl Into<String>, areas: Vec<String>, date: NaiveDate, image: &[u8]) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            areas,
            date,
            image: STANDARD.encode(image),
        }
    }

    /// The base64 payload without any data-URL prefix
    #[must_use]
    pub fn image_payload(&self) -> &str {
        self.image
            .split_once(";base64,")
            .map_or(self.image.as_str(), |(_, payload)| payload)
    }

    /// Decode the stored photo
    ///
    /// # Errors
    ///
    /// Returns a parse error if the image is not valid base64
    pub fn image_bytes(&self) -> AppResult<Vec<u8>> {
        STANDARD
            .decode(self.image_payload())
            .map_err(|e| AppError::parse(format!("Analysis image is not valid base64: {e}")))
    }
}

impl Validate for BodyAnalysis {
    fn validate(&self) -> AppResult<()> {
        ensure_not_blank("name", &self.name)?;
        if self.areas.is_empty() {
            return Err(AppError::missing_field("areas"));
        }
        for area in &self.areas {
            ensure_not_blank("area", area)?;
        }
        if self.image_payload().is_empty() {
            return Err(AppError::missing_field("image"));
        }
        self.image_bytes().map(|_| ())
    }
}
