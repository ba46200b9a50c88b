// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fast tier: trigram candidates, refined by exact edit distance.
//!
//! The posting list narrows the corpus to documents sharing at least one
//! shingle with the query. Only those get the expensive Levenshtein pass.
//! The shared-shingle count picks candidates; it never becomes the score.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::contracts;
use crate::fuzzy::levenshtein;
use crate::index::{shingles, TrigramIndex};
use crate::scoring::ranking::rank;
use crate::scoring::{composite_score, dice_coefficient, QueryClass};
use crate::types::{Document, ScoredDocument};
use crate::util::normalize::char_len;

/// Score every trigram candidate for a normalized `query`, best first.
///
/// Candidates below the class's Dice or composite threshold are dropped. The
/// result is not truncated: the quality gate needs the full count.
pub fn fast_search(
    index: &TrigramIndex,
    documents: &[Document],
    query: &str,
    class: QueryClass,
) -> Vec<ScoredDocument> {
    let query_shingles = shingles(query);
    let candidates: Vec<(usize, usize)> = index.candidates(&query_shingles).into_iter().collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let query_len = char_len(query);
    let (min_dice, min_score) = class.fast_thresholds();

    let score_one = |&(doc_idx, shared): &(usize, usize)| -> Option<ScoredDocument> {
        let doc_shingles = index.shingles_of(doc_idx)?;
        let dice = dice_coefficient(shared, query_shingles.len(), doc_shingles.len());
        contracts::check_unit_interval("dice", dice);
        if dice < min_dice {
            return None;
        }

        let normalized = index.normalized(doc_idx)?;
        let distance = levenshtein(query, normalized);
        let (score, _) = composite_score(class, dice, distance, query_len, char_len(normalized));
        if score < min_score {
            return None;
        }

        Some(ScoredDocument::from_document(
            documents.get(doc_idx)?,
            score,
            dice,
            distance,
        ))
    };

    #[cfg(feature = "parallel")]
    let mut results: Vec<ScoredDocument> = candidates.par_iter().filter_map(score_one).collect();

    #[cfg(not(feature = "parallel"))]
    let mut results: Vec<ScoredDocument> = candidates.iter().filter_map(score_one).collect();

    rank(&mut results);
    results
}
