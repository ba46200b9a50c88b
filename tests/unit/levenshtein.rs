//! Edit distance against a reference implementation on fixed cases.

use shingle::{levenshtein, levenshtein_bounded, similarity};

const PAIRS: &[(&str, &str)] = &[
    ("kitten", "sitting"),
    ("flaw", "lawn"),
    ("대한민국헌법제1조", "대한민국헌법제l조"),
    ("미국독립선언문", "미국 독립 선언문"),
    ("", "abc"),
    ("héllo", "hello"),
    ("제１조", "제1조"),
];

#[test]
fn test_matches_strsim() {
    for (a, b) in PAIRS {
        assert_eq!(levenshtein(a, b), strsim::levenshtein(a, b), "{:?} vs {:?}", a, b);
    }
}

#[test]
fn test_bounded_agrees_when_within_bound() {
    for (a, b) in PAIRS {
        let exact = levenshtein(a, b);
        assert_eq!(levenshtein_bounded(a, b, exact), Some(exact));
        if exact > 0 {
            assert_eq!(levenshtein_bounded(a, b, exact - 1), None);
        }
    }
}

#[test]
fn test_similarity_of_one_ocr_error() {
    let d = levenshtein("대한민국헌법제1조", "대한민국헌법제l조");
    assert_eq!(d, 1);
    assert!((similarity(d, 9, 9) - 8.0 / 9.0).abs() < 1e-12);
}
