// ABOUTME: Error handling re-exports from the fittrack-core crate
// ABOUTME: Keeps crate::errors paths stable for the library and binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The error types live in `fittrack-core` so the models can return them;
//! this module re-exports them under the familiar `crate::errors` path.

pub use fittrack_core::errors::*;
