//! Trigram index construction: shingles, postings, progress, timeouts.

use shingle::{build_trigram_index, shingles, BuildOptions, Error, SystemClock, Trigram};

use crate::common::{make_docs, StepClock};

fn tri(s: &str) -> Trigram {
    Trigram::from_str_exact(s).unwrap()
}

#[test]
fn test_every_document_gets_a_shingle() {
    for text in ["", "a", "ab", "abc", "헌"] {
        assert!(!shingles(text).is_empty(), "{:?} has no shingles", text);
    }
    assert!(shingles("a").contains(&tri("a__")));
    assert!(shingles("").contains(&tri("___")));
}

#[test]
fn test_hangul_shingles_are_syllables() {
    let set = shingles("헌법제1조");
    assert_eq!(set.len(), 3);
    assert!(set.contains(&tri("헌법제")));
    assert!(set.contains(&tri("제1조")));
}

#[test]
fn test_postings_point_back_to_documents() {
    let docs = make_docs(&["대한민국 헌법 제1조", "대한민국 국기", "미국"]);
    let index =
        build_trigram_index(&docs, &BuildOptions::default(), &SystemClock::new(), |_| {}).unwrap();

    assert_eq!(index.len(), 3);
    assert_eq!(index.normalized(0), Some("대한민국헌법제1조"));
    assert_eq!(index.postings(&tri("대한민")), &[0, 1]);
    assert_eq!(index.postings(&tri("헌법제")), &[0]);
    assert!(index.postings(&tri("없는것")).is_empty());

    for doc in 0..index.len() {
        for trigram in index.shingles_of(doc).unwrap() {
            assert!(index.postings(trigram).contains(&(doc as u32)));
        }
    }
}

#[test]
fn test_candidates_count_shared_shingles() {
    let docs = make_docs(&["abcdef", "abcxyz", "qqqqqq"]);
    let index =
        build_trigram_index(&docs, &BuildOptions::default(), &SystemClock::new(), |_| {}).unwrap();

    let candidates = index.candidates(&shingles("abcdeq"));
    assert_eq!(candidates.get(&0), Some(&3)); // abc, bcd, cde
    assert_eq!(candidates.get(&1), Some(&1)); // abc
    assert_eq!(candidates.get(&2), None);
}

#[test]
fn test_progress_reaches_total() {
    let texts: Vec<String> = (0..5).map(|i| format!("document {}", i)).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let docs = make_docs(&refs);
    let options = BuildOptions {
        timeout_ms: 10_000,
        progress_interval: 2,
    };

    let mut seen = Vec::new();
    build_trigram_index(&docs, &options, &SystemClock::new(), |p| {
        assert_eq!(p.total, 5);
        seen.push(p.processed);
    })
    .unwrap();
    assert_eq!(seen, vec![1, 3, 5]);
}

#[test]
fn test_timeout_discards_the_build() {
    let docs = make_docs(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
    let options = BuildOptions {
        timeout_ms: 5,
        progress_interval: 100,
    };

    let mut seen = Vec::new();
    let err = build_trigram_index(&docs, &options, &StepClock::new(1.0), |p| {
        seen.push(p.processed)
    })
    .unwrap_err();

    assert_eq!(
        err,
        Error::IndexBuildTimeout {
            elapsed_ms: 6,
            timeout_ms: 5
        }
    );
    assert_eq!(seen, vec![1]);
}

#[test]
fn test_empty_corpus_builds_empty_index() {
    let mut calls = 0;
    let index =
        build_trigram_index(&[], &BuildOptions::default(), &SystemClock::new(), |_| calls += 1)
            .unwrap();
    assert!(index.is_empty());
    assert_eq!(index.vocabulary_len(), 0);
    assert_eq!(calls, 0);
}
