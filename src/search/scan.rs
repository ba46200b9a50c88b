// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Full-scan tier: edit distance against every document.
//!
//! The last resort. No index needed, so it also works while a build is
//! running or after one timed out. Cost is O(docs × |query| × |doc|), which is
//! fine for the low-thousands corpora this engine targets.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::contracts;
use crate::fuzzy::{levenshtein_bounded, similarity};
use crate::scoring::ranking::rank;
use crate::scoring::{scan_max_distance, QueryClass};
use crate::state::IndexState;
use crate::types::ScoredDocument;
use crate::util::normalize::char_len;

/// Every document within `max(2, floor(0.3 * |query|))` edits, best `limit`.
///
/// Score is similarity × 0.9 for short queries and × 0.7 otherwise; `dice`
/// carries the raw similarity. Documents whose normalized text is empty are
/// skipped.
pub fn full_scan(state: &IndexState, query: &str, limit: usize) -> Vec<ScoredDocument> {
    let query_len = char_len(query);
    let class = QueryClass::from_len(query_len);
    let max_distance = scan_max_distance(query_len);

    let score_one = |doc_idx: usize| -> Option<ScoredDocument> {
        let normalized = state.normalized(doc_idx);
        if normalized.is_empty() {
            return None;
        }

        let distance = levenshtein_bounded(query, &normalized, max_distance)?;
        let sim = similarity(distance, query_len, char_len(&normalized));
        contracts::check_unit_interval("similarity", sim);
        let score = sim * class.scan_factor();

        Some(ScoredDocument::from_document(
            &state.documents()[doc_idx],
            score,
            sim,
            distance,
        ))
    };

    #[cfg(feature = "parallel")]
    let mut results: Vec<ScoredDocument> = (0..state.len())
        .into_par_iter()
        .filter_map(score_one)
        .collect();

    #[cfg(not(feature = "parallel"))]
    let mut results: Vec<ScoredDocument> = (0..state.len()).filter_map(score_one).collect();

    rank(&mut results);
    results.truncate(limit);
    results
}
