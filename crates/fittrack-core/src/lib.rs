// ABOUTME: Core types and constants for the FitTrack fitness tracker
// ABOUTME: Foundation crate with error handling, storage keys, and validated data models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitTrack Core
//!
//! Foundation crate providing shared types and constants for the `FitTrack`
//! tracker. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ErrorKind`
//! - **constants**: Storage keys, schema versions, and physiological constants
//! - **models**: Typed data-transfer objects validated at the storage boundary

/// Unified error handling system with standard error codes and error kinds
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (profile, nutrition, workouts, hydration, body analyses)
pub mod models;
