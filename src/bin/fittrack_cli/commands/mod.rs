// ABOUTME: Subcommand modules for fittrack-cli
// ABOUTME: One module per screen of the tracker plus calculators, AI coach and report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod analysis;
pub mod calc;
pub mod chat;
pub mod meal;
pub mod plan;
pub mod profile;
pub mod report;
pub mod water;
pub mod workout;
