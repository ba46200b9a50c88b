//! Result ordering, margins, limits and payloads.

use serde_json::json;
use shingle::{Document, SearchEngine};

use crate::common::{constitution_docs, ids, make_docs, ready_engine};

#[test]
fn test_margin_is_gap_between_top_two() {
    let engine = ready_engine(make_docs(&[
        "the quick brown fox",
        "lazy dog sleeps",
        "quick brown foxes jump",
    ]));
    let outcome = engine.search("quick brown fox", None, None).unwrap();
    assert_eq!(outcome.results.len(), 2);

    let gap = outcome.results[0].score - outcome.results[1].score;
    assert!(gap > 0.0);
    for row in &outcome.results {
        assert_eq!(row.margin, gap);
    }
    assert_eq!(outcome.margin(), gap);
}

#[test]
fn test_single_result_margin_is_its_score() {
    let engine = ready_engine(constitution_docs());
    let outcome = engine.search("대한민국 헌법 제l조", None, None).unwrap();
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].margin, outcome.results[0].score);
}

#[test]
fn test_tied_scores_keep_corpus_order() {
    let engine = SearchEngine::default();
    engine
        .build_index(make_docs(&["android basics", "android law", "ios"]), None, |_| {})
        .unwrap();
    let outcome = engine.search("android", None, None).unwrap();

    assert_eq!(ids(&outcome.results), vec!["1", "2"]);
    assert!(outcome.results.iter().all(|r| r.margin == 0.0));
}

#[test]
fn test_limit_truncates_after_ranking() {
    let engine = ready_engine(make_docs(&["법 a", "헌법 b", "법률 c", "헌법"]));
    let all = engine.search("헌법", Some(10), None).unwrap();
    assert_eq!(ids(&all.results), vec!["2", "4"]);

    let one = engine.search("헌법", Some(1), None).unwrap();
    assert_eq!(ids(&one.results), vec!["2"]);
    assert_eq!(one.results[0].margin, 1.0);
}

#[test]
fn test_default_limit_is_three() {
    let texts: Vec<String> = (0..6).map(|i| format!("헌법 {}", i)).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let engine = ready_engine(make_docs(&refs));

    let outcome = engine.search("헌법", None, None).unwrap();
    assert_eq!(ids(&outcome.results), vec!["1", "2", "3"]);
}

#[test]
fn test_payload_comes_back_untouched() {
    let payload = json!({"sheet": "법령", "index": 7, "answer": "제1조"});
    let docs = vec![
        Document::new("a", "대한민국 헌법 제1조").with_payload(payload.clone()),
        Document::new("b", "미국 독립선언문"),
    ];
    let engine = ready_engine(docs);

    let outcome = engine.search("헌법제1조", None, None).unwrap();
    assert_eq!(outcome.results[0].id, "a");
    assert_eq!(outcome.results[0].text, "대한민국 헌법 제1조");
    assert_eq!(outcome.results[0].payload.as_ref(), Some(&payload));

    let outcome = engine.search("독립", None, None).unwrap();
    assert_eq!(outcome.results[0].payload, None);
}

#[test]
fn test_repeated_searches_are_identical() {
    let engine = ready_engine(constitution_docs());
    for query in ["헌법제1조", "대한민국 헌법 제l조", "미국 독립", "없는 문서"] {
        let first = engine.search(query, None, None).unwrap();
        let second = engine.search(query, None, None).unwrap();
        assert_eq!(first, second, "{:?} is not deterministic", query);
    }
}
