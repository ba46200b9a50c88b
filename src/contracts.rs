// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the index and result invariants.
//!
//! Debug-mode assertions that check the properties the rest of the crate
//! relies on. They:
//!
//! 1. Are **zero-cost in release builds** (`debug_assert!`)
//! 2. Fail **at the point of violation**, not three calls later as a wrong score
//!
//! | Contract function        | Property                                         |
//! |--------------------------|--------------------------------------------------|
//! | `check_trigram_index`    | aligned caches, non-empty shingles, exact postings |
//! | `check_results_sorted`   | scores non-increasing                            |
//! | `check_margin_uniform`   | every row carries the same margin                |
//! | `check_unit_interval`    | Dice and similarity live in `[0, 1]`             |

use crate::index::TrigramIndex;
use crate::scoring::{
    FAST_MIN_DICE, FAST_MIN_SCORE, LONG_DICE_WEIGHT, LONG_SIMILARITY_WEIGHT, QUALITY_GATE_SCORE,
    SHORT_DICE_WEIGHT, SHORT_FAST_MIN_DICE, SHORT_FAST_MIN_SCORE, SHORT_SIMILARITY_WEIGHT,
};
use crate::types::ScoredDocument;

// ============================================================================
// COMPILE-TIME ASSERTIONS
// ============================================================================

/// Composite weights are convex combinations and short-query thresholds are
/// looser than normal ones. If this fails, the crate won't build.
const _: () = {
    assert!(SHORT_DICE_WEIGHT + SHORT_SIMILARITY_WEIGHT == 1.0);
    assert!(LONG_DICE_WEIGHT + LONG_SIMILARITY_WEIGHT == 1.0);
    assert!(SHORT_FAST_MIN_DICE < FAST_MIN_DICE);
    assert!(SHORT_FAST_MIN_SCORE < FAST_MIN_SCORE);
    assert!(FAST_MIN_SCORE < QUALITY_GATE_SCORE);
};

// ============================================================================
// INDEX CONTRACTS
// ============================================================================

/// Check the trigram index against its corpus size.
///
/// # Panics (debug builds only)
/// Panics if caches are misaligned, a document has no shingles, a posting
/// list is unsorted, or postings and shingle sets disagree.
#[inline]
pub fn check_trigram_index(index: &TrigramIndex, corpus_len: usize) {
    debug_assert_eq!(
        index.normalized.len(),
        corpus_len,
        "Contract violation: normalized cache has {} entries for {} documents",
        index.normalized.len(),
        corpus_len
    );
    debug_assert_eq!(
        index.shingles.len(),
        corpus_len,
        "Contract violation: shingle cache has {} entries for {} documents",
        index.shingles.len(),
        corpus_len
    );

    if cfg!(debug_assertions) {
        for (doc, set) in index.shingles.iter().enumerate() {
            debug_assert!(
                !set.is_empty(),
                "Contract violation: document {} has no shingles",
                doc
            );
            for trigram in set {
                debug_assert!(
                    index.postings(trigram).binary_search(&(doc as u32)).is_ok(),
                    "Contract violation: document {} missing from postings of {}",
                    doc,
                    trigram
                );
            }
        }

        for (trigram, docs) in &index.postings {
            debug_assert!(
                docs.windows(2).all(|w| w[0] < w[1]),
                "Contract violation: postings of {} not strictly increasing",
                trigram
            );
            for &doc in docs {
                debug_assert!(
                    index
                        .shingles
                        .get(doc as usize)
                        .is_some_and(|set| set.contains(trigram)),
                    "Contract violation: postings of {} list document {} without that shingle",
                    trigram,
                    doc
                );
            }
        }
    }
}

// ============================================================================
// RESULT CONTRACTS
// ============================================================================

/// Check that results are ordered by descending score.
#[inline]
pub fn check_results_sorted(results: &[ScoredDocument]) {
    for (i, pair) in results.windows(2).enumerate() {
        debug_assert!(
            pair[0].score >= pair[1].score,
            "Contract violation: results[{}].score {} < results[{}].score {}",
            i,
            pair[0].score,
            i + 1,
            pair[1].score
        );
    }
}

/// Check that the margin was stamped on every row.
#[inline]
pub fn check_margin_uniform(results: &[ScoredDocument]) {
    if let Some(first) = results.first() {
        for (i, row) in results.iter().enumerate() {
            debug_assert!(
                row.margin.to_bits() == first.margin.to_bits(),
                "Contract violation: results[{}].margin {} differs from {}",
                i,
                row.margin,
                first.margin
            );
        }
    }
}

/// Check that a ratio lies in `[0, 1]`.
#[inline]
pub fn check_unit_interval(name: &str, value: f64) {
    debug_assert!(
        (0.0..=1.0).contains(&value),
        "Contract violation: {} = {} outside [0, 1]",
        name,
        value
    );
}
