// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via edit distance.
//!
//! The trigram tier finds candidates; edit distance decides how close they
//! really are. The full-scan tier uses it alone.

mod levenshtein;

pub use levenshtein::*;
