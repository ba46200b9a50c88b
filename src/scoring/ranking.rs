// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ordering and the ambiguity margin.
//!
//! Every tier sorts the same way: score descending, ties left in corpus order
//! (the sort is stable and tiers emit rows in document order). Determinism
//! falls out of that for free.

use crate::contracts;
use crate::types::ScoredDocument;
use std::cmp::Ordering;

/// Higher score first. NaN never appears here, but `total_cmp` keeps the
/// comparator total anyway.
pub fn compare_results(a: &ScoredDocument, b: &ScoredDocument) -> Ordering {
    b.score.total_cmp(&a.score)
}

/// Stable sort by descending score.
pub fn rank(results: &mut [ScoredDocument]) {
    results.sort_by(compare_results);
    contracts::check_results_sorted(results);
}

/// Gap between the two best scores.
///
/// `top1 - top2`, or `top1` when there is one result, or 0 when there are none.
pub fn margin(results: &[ScoredDocument]) -> f64 {
    match results {
        [] => 0.0,
        [only] => only.score,
        [first, second, ..] => first.score - second.score,
    }
}

/// Compute the margin and write it into every row.
pub fn apply_margin(results: &mut [ScoredDocument]) {
    let value = margin(results);
    for row in results.iter_mut() {
        row.margin = value;
    }
    contracts::check_margin_uniform(results);
}
