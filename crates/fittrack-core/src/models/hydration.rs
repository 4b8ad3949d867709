// ABOUTME: Water intake model for the hydration tracker
// ABOUTME: Glass count bound to the day it was recorded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Validate;
use crate::constants::hydration::MAX_GLASSES_PER_DAY;
use crate::errors::{AppError, AppResult};

/// Glasses of water drunk on `date`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterLog {
    /// Glass count
    pub glasses: u32,
    /// Day the count belongs to
    pub date: NaiveDate,
}

impl WaterLog {
    /// Empty log for a day
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self { glasses: 0, date }
    }

    /// The log as seen on `today`: a count from an earlier day reads as zero
    #[must_use]
    pub fn for_day(self, today: NaiveDate) -> Self {
        if self.date == today {
            self
        } else {
            Self::empty(today)
        }
    }
}

impl Validate for WaterLog {
    fn validate(&self) -> AppResult<()> {
        if self.glasses > MAX_GLASSES_PER_DAY {
            return Err(AppError::out_of_range(format!(
                "glasses must not exceed {MAX_GLASSES_PER_DAY} per day"
            )));
        }
        Ok(())
    }
}
