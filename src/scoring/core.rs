// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind search ranking.
//!
//! Two signals: Dice overlap of trigram sets (robust to scattered OCR errors)
//! and edit-distance similarity (precise once the candidate set is small).
//! How much each counts depends on how long the query is. Short queries have
//! few shingles, so one bad character wrecks Dice; they lean on similarity
//! more.
//!
//! # Constants
//!
//! | Query | Similarity weight | Dice weight | Min Dice | Min score |
//! |-------|-------------------|-------------|----------|-----------|
//! | short | 0.5               | 0.5         | 0.1      | 0.15      |
//! | long  | 0.3               | 0.7         | 0.2      | 0.25      |
//!
//! Fast-tier results are trusted only if there are at least `limit` of them or
//! the best one reaches [`QUALITY_GATE_SCORE`].

use crate::fuzzy::similarity;
use crate::util::normalize::char_len;

/// Normalized queries shorter than this skip the trigram tier entirely.
pub const SHORT_QUERY_LEN: usize = 6;

// =============================================================================
// COMPOSITE WEIGHTS
// =============================================================================

pub const SHORT_SIMILARITY_WEIGHT: f64 = 0.5;
pub const SHORT_DICE_WEIGHT: f64 = 0.5;
pub const LONG_SIMILARITY_WEIGHT: f64 = 0.3;
pub const LONG_DICE_WEIGHT: f64 = 0.7;

// =============================================================================
// FAST TIER THRESHOLDS
// =============================================================================

pub const FAST_MIN_DICE: f64 = 0.2;
pub const SHORT_FAST_MIN_DICE: f64 = 0.1;
pub const FAST_MIN_SCORE: f64 = 0.25;
pub const SHORT_FAST_MIN_SCORE: f64 = 0.15;

/// Below this top score, a fast result set smaller than `limit` is rejected.
pub const QUALITY_GATE_SCORE: f64 = 0.3;

// =============================================================================
// LEGACY / FULL SCAN SCORES
// =============================================================================

/// Legacy hit where the query starts the text.
pub const LEGACY_PREFIX_SCORE: f64 = 1.0;
/// Legacy hit anywhere else.
pub const LEGACY_CONTAINS_SCORE: f64 = 0.8;

/// Full-scan score multipliers applied to similarity.
pub const SCAN_SHORT_FACTOR: f64 = 0.9;
pub const SCAN_LONG_FACTOR: f64 = 0.7;

/// Fraction of the query length tolerated as edit distance in a full scan.
pub const SCAN_DISTANCE_RATIO: f64 = 0.3;
/// Floor on the tolerated edit distance.
pub const SCAN_MIN_DISTANCE: usize = 2;

/// Default number of results when the caller does not say.
pub const DEFAULT_LIMIT: usize = 3;

/// Query length class, decided on the normalized query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryClass {
    Short,
    Long,
}

impl QueryClass {
    pub fn of(normalized_query: &str) -> Self {
        Self::from_len(char_len(normalized_query))
    }

    pub fn from_len(len: usize) -> Self {
        if len < SHORT_QUERY_LEN {
            QueryClass::Short
        } else {
            QueryClass::Long
        }
    }

    pub fn is_short(self) -> bool {
        self == QueryClass::Short
    }

    /// `(similarity weight, dice weight)`
    pub fn weights(self) -> (f64, f64) {
        match self {
            QueryClass::Short => (SHORT_SIMILARITY_WEIGHT, SHORT_DICE_WEIGHT),
            QueryClass::Long => (LONG_SIMILARITY_WEIGHT, LONG_DICE_WEIGHT),
        }
    }

    /// `(min dice, min composite score)` for the fast tier.
    pub fn fast_thresholds(self) -> (f64, f64) {
        match self {
            QueryClass::Short => (SHORT_FAST_MIN_DICE, SHORT_FAST_MIN_SCORE),
            QueryClass::Long => (FAST_MIN_DICE, FAST_MIN_SCORE),
        }
    }

    pub fn scan_factor(self) -> f64 {
        match self {
            QueryClass::Short => SCAN_SHORT_FACTOR,
            QueryClass::Long => SCAN_LONG_FACTOR,
        }
    }
}

/// `2 * shared / (query_len + doc_len)`, or 0 when both sets are empty.
///
/// ```
/// use shingle::dice_coefficient;
///
/// assert_eq!(dice_coefficient(0, 0, 0), 0.0);
/// assert_eq!(dice_coefficient(3, 3, 3), 1.0);
/// ```
pub fn dice_coefficient(shared: usize, query_len: usize, doc_len: usize) -> f64 {
    let total = query_len + doc_len;
    if total == 0 {
        return 0.0;
    }
    (2 * shared) as f64 / total as f64
}

/// Blend Dice and edit-distance similarity.
///
/// Returns `(score, similarity)` so callers can report both.
pub fn composite_score(
    class: QueryClass,
    dice: f64,
    distance: usize,
    query_len: usize,
    doc_len: usize,
) -> (f64, f64) {
    let sim = similarity(distance, query_len, doc_len);
    let (sim_weight, dice_weight) = class.weights();
    (dice * dice_weight + sim * sim_weight, sim)
}

/// Largest edit distance a full scan tolerates for a query of `query_len` chars.
///
/// `max(2, floor(0.3 * query_len))`
pub fn scan_max_distance(query_len: usize) -> usize {
    let scaled = (query_len as f64 * SCAN_DISTANCE_RATIO).floor() as usize;
    scaled.max(SCAN_MIN_DISTANCE)
}
