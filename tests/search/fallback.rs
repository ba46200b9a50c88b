//! Fallback tiers: what happens when the index cannot answer.

use shingle::{Error, IndexStatus, SearchTier, Used};

use crate::common::{fast_config, ids, make_docs, ready_engine, stepping_engine};

#[test]
fn test_weak_index_hits_fall_through_to_substring() {
    // The query starts the document, but the document is so much longer that
    // the trigram score lands just under the quality gate.
    let engine = ready_engine(make_docs(&["abcdefghijklmnopqrstuvwxyz0123456789"]));
    let outcome = engine.search("abcdefgh", None, None).unwrap();

    assert_eq!(outcome.used, Used::Fast);
    assert_eq!(outcome.tier, Some(SearchTier::Legacy));
    assert_eq!(ids(&outcome.results), vec!["1"]);
    assert_eq!(outcome.results[0].score, 1.0);
}

#[test]
fn test_weak_index_hits_survive_when_limit_is_met() {
    // Same weak hit, but one result satisfies a limit of one
    let engine = ready_engine(make_docs(&["abcdefghijklmnopqrstuvwxyz0123456789"]));
    let outcome = engine.search("abcdefgh", Some(1), None).unwrap();

    assert_eq!(outcome.tier, Some(SearchTier::Fast));
    assert!(outcome.results[0].score < 0.3);
    assert!(outcome.results[0].score >= 0.25);
}

#[test]
fn test_no_shared_shingles_reaches_full_scan() {
    // Every query trigram contains one of the three substituted characters
    let engine = ready_engine(make_docs(&["abcdefghij", "zzzzzzzzzz"]));
    let outcome = engine.search("abxdexghxj", None, None).unwrap();

    assert_eq!(outcome.tier, Some(SearchTier::FullScan));
    assert_eq!(ids(&outcome.results), vec!["1"]);
    let hit = &outcome.results[0];
    assert_eq!(hit.distance, 3);
    assert!((hit.score - 0.7 * 0.7).abs() < 1e-9);
    assert!((hit.dice - 0.7).abs() < 1e-9);
}

#[test]
fn test_full_scan_tolerance_is_bounded() {
    // Four edits on a ten-character query is past the allowance of three
    let engine = ready_engine(make_docs(&["abcdefghij"]));
    let outcome = engine.search("xbxdexghxj", None, None).unwrap();

    assert_eq!(outcome.tier, Some(SearchTier::FullScan));
    assert!(outcome.results.is_empty());
    assert_eq!(outcome.margin(), 0.0);
}

#[test]
fn test_timed_out_build_still_serves_the_new_corpus() {
    let engine = stepping_engine(fast_config(), 1.0);
    let err = engine
        .build_index(make_docs(&["미국 독립선언문", "대한민국 헌법"]), Some(0), |_| {})
        .unwrap_err();

    assert!(matches!(err, Error::IndexBuildTimeout { timeout_ms: 0, .. }));
    assert_eq!(engine.status(), IndexStatus::Failed);
    assert!(!engine.index_ready());

    let outcome = engine.search("독립", None, Some(true)).unwrap();
    assert_eq!(outcome.used, Used::Legacy);
    assert_eq!(ids(&outcome.results), vec!["1"]);
}

#[test]
fn test_rebuild_after_failure_recovers() {
    let engine = stepping_engine(fast_config(), 1.0);
    assert!(engine.build_index(make_docs(&["a", "b"]), Some(0), |_| {}).is_err());

    let size = engine
        .build_index(make_docs(&["대한민국 헌법 제1조"]), Some(1_000_000), |_| {})
        .unwrap();
    assert_eq!(size, 1);
    assert_eq!(engine.status(), IndexStatus::Ready);

    let outcome = engine.search("대한민국 헌법 제l조", None, None).unwrap();
    assert_eq!(outcome.used, Used::Fast);
    assert_eq!(outcome.tier, Some(SearchTier::Fast));
}

#[test]
fn test_empty_corpus_returns_nothing() {
    let engine = ready_engine(Vec::new());
    assert!(engine.index_ready());
    for query in ["헌법", "대한민국 헌법 제1조"] {
        let outcome = engine.search(query, None, None).unwrap();
        assert!(outcome.results.is_empty(), "{:?} matched", query);
    }
}

#[test]
fn test_punctuation_only_query_is_empty() {
    let engine = ready_engine(make_docs(&["헌법"]));
    let outcome = engine.search(" \u{200B}?! ", None, None).unwrap();
    assert!(outcome.results.is_empty());
    assert_eq!(outcome.tier, None);
}
