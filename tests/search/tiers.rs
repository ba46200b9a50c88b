//! Which tier answers a query, and what the caller is told about it.

use shingle::search::plan;
use shingle::{Document, QueryClass, SearchEngine, SearchTier, Used};

use crate::common::{constitution_docs, fast_config, ids, make_docs, ready_engine};

fn fox_docs() -> Vec<Document> {
    make_docs(&["the quick brown fox", "lazy dog sleeps", "quick brown foxes jump"])
}

#[test]
fn test_tier_order_by_query_length() {
    use SearchTier::*;

    assert_eq!(plan(QueryClass::Short, true), &[Legacy, FullScan]);
    assert_eq!(plan(QueryClass::Short, false), &[Legacy, FullScan]);
    assert_eq!(plan(QueryClass::Long, true), &[Fast, Legacy, FullScan]);
    assert_eq!(plan(QueryClass::Long, false), &[Legacy, FullScan]);
}

#[test]
fn test_long_query_is_answered_by_the_index() {
    let engine = ready_engine(fox_docs());
    let outcome = engine.search("quick brown fox", None, None).unwrap();

    assert_eq!(outcome.used, Used::Fast);
    assert_eq!(outcome.tier, Some(SearchTier::Fast));
    assert_eq!(ids(&outcome.results), vec!["1", "3"]);

    // 11 of 11 query shingles shared with a 14-shingle document, 3 edits
    let top = &outcome.results[0];
    assert!((top.dice - 0.88).abs() < 1e-9);
    assert_eq!(top.distance, 3);
    assert!((top.score - (0.88 * 0.7 + 0.8125 * 0.3)).abs() < 1e-9);
}

#[test]
fn test_long_query_falls_from_index_to_substring_to_scan() {
    // Index hit is weak and alone, so substring matching takes over
    let engine = ready_engine(make_docs(&["abcdefghijklmnopqrstuvwxyz0123456789"]));
    let outcome = engine.search("abcdefgh", None, None).unwrap();
    assert_eq!(outcome.tier, Some(SearchTier::Legacy));

    // No shared shingles and no substring: only the scan finds it
    let engine = ready_engine(make_docs(&["abcdefghij"]));
    let outcome = engine.search("abxdexghxj", None, None).unwrap();
    assert_eq!(outcome.tier, Some(SearchTier::FullScan));
    assert_eq!(ids(&outcome.results), vec!["1"]);
}

#[test]
fn test_short_query_skips_the_index() {
    let engine = ready_engine(fox_docs());
    let outcome = engine.search("fox", None, None).unwrap();

    // Fast search was in effect even though the trigram tier never ran
    assert_eq!(outcome.used, Used::Fast);
    assert_eq!(outcome.tier, Some(SearchTier::Legacy));
    assert_eq!(ids(&outcome.results), vec!["1", "3"]);
    assert!(outcome.results.iter().all(|r| r.score == 0.8));

    // A short slip nothing contains goes to the scan
    let outcome = engine.search("foz", None, None).unwrap();
    assert_eq!(outcome.tier, Some(SearchTier::FullScan));
}

#[test]
fn test_fast_off_goes_straight_to_substring_matching() {
    let engine = ready_engine(fox_docs());
    let outcome = engine.search("quick brown fox", None, Some(false)).unwrap();

    assert_eq!(outcome.used, Used::Legacy);
    assert_eq!(outcome.tier, Some(SearchTier::Legacy));
    // Compacted query: a prefix of doc 3, inside doc 1
    assert_eq!(ids(&outcome.results), vec!["3", "1"]);
    assert_eq!(outcome.results[0].score, 1.0);
    assert_eq!(outcome.results[1].score, 0.8);

    let outcome = engine.search("quick brovn fox", None, Some(false)).unwrap();
    assert_eq!(outcome.tier, Some(SearchTier::FullScan));
}

#[test]
fn test_flag_decides_when_caller_is_silent() {
    let engine = SearchEngine::default();
    engine.build_index(fox_docs(), None, |_| {}).unwrap();

    let outcome = engine.search("quick brown fox", None, None).unwrap();
    assert_eq!(outcome.used, Used::Legacy);
    assert_eq!(outcome.tier, Some(SearchTier::Legacy));

    // An explicit request overrides the flag
    let outcome = engine.search("quick brown fox", None, Some(true)).unwrap();
    assert_eq!(outcome.used, Used::Fast);
    assert_eq!(outcome.tier, Some(SearchTier::Fast));
}

#[test]
fn test_no_index_means_no_fast_search() {
    let engine = SearchEngine::new(fast_config());
    let outcome = engine.search("quick brown fox", None, Some(true)).unwrap();

    assert_eq!(outcome.used, Used::Legacy);
    assert!(outcome.results.is_empty());
    assert_eq!(outcome.tier, Some(SearchTier::FullScan));
}

#[test]
fn test_noisy_korean_query_uses_the_index() {
    let engine = ready_engine(constitution_docs());
    let outcome = engine.search("대한민국 헌법 제l조", None, None).unwrap();

    assert_eq!(outcome.tier, Some(SearchTier::Fast));
    assert_eq!(ids(&outcome.results), vec!["1"]);
    assert_eq!(outcome.results[0].distance, 1);
}
