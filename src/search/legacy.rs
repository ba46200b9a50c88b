// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Legacy tier: plain case-insensitive substring containment.
//!
//! The oldest and dumbest tier, and still the one that answers most short
//! queries. A document matches if its lowercased raw text contains the
//! query; failing that, if its normalized text does (so "헌법제1조" still
//! finds "헌법 제1조"). Position decides the score: 1.0 when the query starts
//! the text it matched in, 0.8 anywhere else.

use crate::scoring::ranking::rank;
use crate::scoring::{LEGACY_CONTAINS_SCORE, LEGACY_PREFIX_SCORE};
use crate::state::IndexState;
use crate::types::ScoredDocument;

/// Substring scan over every document, best `limit` hits.
///
/// `query` is expected to be normalized already; it is lowercased again here
/// so callers passing raw text get the documented case-insensitivity.
pub fn legacy_search(state: &IndexState, query: &str, limit: usize) -> Vec<ScoredDocument> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<ScoredDocument> = state
        .documents()
        .iter()
        .enumerate()
        .filter_map(|(doc_idx, doc)| {
            let position = doc
                .text
                .to_lowercase()
                .find(&needle)
                .or_else(|| state.normalized(doc_idx).find(&needle))?;

            let score = if position == 0 {
                LEGACY_PREFIX_SCORE
            } else {
                LEGACY_CONTAINS_SCORE
            };
            Some(ScoredDocument::from_document(doc, score, score, 0))
        })
        .collect();

    rank(&mut results);
    results.truncate(limit);
    results
}
