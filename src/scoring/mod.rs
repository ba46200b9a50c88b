// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! `core` holds the formulas and every threshold the tiers use. `ranking`
//! orders results and computes the ambiguity margin.

mod core;
pub mod ranking;

pub use core::*;
