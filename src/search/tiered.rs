// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The fallback chain: fast → legacy → full scan.
//!
//! Each query gets a fixed plan, an ordered list of tiers. Tiers run in order
//! until one produces an acceptable result set:
//!
//! | Query | Fast search | Plan                       |
//! |-------|-------------|----------------------------|
//! | short | any         | legacy, full scan          |
//! | long  | on          | fast, legacy, full scan    |
//! | long  | off         | legacy, full scan          |
//!
//! Short queries never touch the trigram tier: five characters make three
//! shingles, and one OCR error kills two of them.
//!
//! Acceptance:
//! - **Fast**: non-empty, and either at least `limit` rows or a top score of
//!   [`QUALITY_GATE_SCORE`] or more. A single strong hit that doesn't fill
//!   `limit` but clears the gate is kept; a handful of weak ones is not.
//! - **Legacy**: non-empty.
//! - **Full scan**: always, even when empty. It is the last word.

use tracing::debug;

use super::fast::fast_search;
use super::legacy::legacy_search;
use super::scan::full_scan;
use crate::scoring::{QueryClass, QUALITY_GATE_SCORE};
use crate::state::IndexState;
use crate::types::{ScoredDocument, SearchTier};

const SHORT_PLAN: &[SearchTier] = &[SearchTier::Legacy, SearchTier::FullScan];
const FAST_PLAN: &[SearchTier] = &[SearchTier::Fast, SearchTier::Legacy, SearchTier::FullScan];

/// Tiers to try, in order, for this query.
pub fn plan(class: QueryClass, use_fast: bool) -> &'static [SearchTier] {
    if use_fast && !class.is_short() {
        FAST_PLAN
    } else {
        SHORT_PLAN
    }
}

/// Does a fast-tier result set pass the quality gate?
///
/// Rejects an empty set, and a set smaller than `limit` whose best score is
/// under [`QUALITY_GATE_SCORE`].
pub fn passes_quality_gate(results: &[ScoredDocument], limit: usize) -> bool {
    match results.first() {
        None => false,
        Some(top) => results.len() >= limit || top.score >= QUALITY_GATE_SCORE,
    }
}

/// Run the plan for a normalized, non-empty `query`.
///
/// Returns the accepted rows (at most `limit`, margin not yet applied) and the
/// tier that produced them. `use_fast` is ignored when `state` has no index.
pub fn tiered_search(
    state: &IndexState,
    query: &str,
    limit: usize,
    use_fast: bool,
) -> (Vec<ScoredDocument>, SearchTier) {
    let class = QueryClass::of(query);
    let index = state.index().filter(|_| use_fast);
    let tiers = plan(class, index.is_some());

    let mut last = (Vec::new(), SearchTier::FullScan);
    for (position, &tier) in tiers.iter().enumerate() {
        let is_last = position + 1 == tiers.len();

        let (results, ok) = match tier {
            SearchTier::Fast => {
                let Some(index) = index else { continue };
                let mut results = fast_search(index, state.documents(), query, class);
                let ok = passes_quality_gate(&results, limit);
                if !ok {
                    debug!(
                        candidates = results.len(),
                        top = results.first().map_or(0.0, |r| r.score),
                        limit,
                        "fast tier below quality gate"
                    );
                }
                results.truncate(limit);
                (results, ok)
            }
            SearchTier::Legacy => {
                let results = legacy_search(state, query, limit);
                let ok = !results.is_empty();
                if !ok {
                    debug!("legacy tier found nothing");
                }
                (results, ok)
            }
            SearchTier::FullScan => (full_scan(state, query, limit), true),
        };

        if ok || is_last {
            debug!(tier = %tier, hits = results.len(), "tier accepted");
            return (results, tier);
        }
        last = (results, tier);
    }

    last
}
