//! Normalizer behavior on realistic OCR output.

use shingle::{classify, normalize, TextClass};

#[test]
fn test_fullwidth_digits_match_ascii() {
    assert_eq!(normalize("１２３"), normalize("123"));
    assert_eq!(normalize("제１조"), "제1조");
}

#[test]
fn test_fullwidth_latin_is_lowercased() {
    assert_eq!(normalize("Ｈｅｌｌｏ"), "hello");
    assert_eq!(normalize("ABC"), "abc");
}

#[test]
fn test_prolonged_sound_marks_become_hyphens() {
    assert_eq!(normalize("ー"), "-");
    // Halfwidth form goes through NFKC first, then the fold
    assert_eq!(normalize("ｰ"), "-");
}

#[test]
fn test_zero_width_joiners_are_removed() {
    assert_eq!(normalize("a\u{200D}b"), "ab");
    assert_eq!(normalize("헌\u{200C}법\u{200B}"), "헌법");
}

#[test]
fn test_curly_and_straight_quotes_are_stripped() {
    assert_eq!(normalize("‘헌법’"), "헌법");
    assert_eq!(normalize("\"헌법\""), "헌법");
}

#[test]
fn test_long_text_is_compacted() {
    assert_eq!(normalize("대한민국 헌법, 제1조!"), "대한민국헌법제1조");
    assert_eq!(normalize("안 드 로 이 드 폰"), "안드로이드폰");
}

#[test]
fn test_short_text_keeps_word_boundaries() {
    assert_eq!(normalize("안 드 로 이 드"), "안 드 로 이 드");
    assert_eq!(normalize("a\tb\nc"), "a b c");
    assert_eq!(normalize("  미국  독립 "), "미국 독립");
}

#[test]
fn test_classification_uses_dense_length() {
    // Nine characters wide, five glyphs
    assert_eq!(classify("안 드 로 이 드"), TextClass::Short);
    assert_eq!(classify("안드로이드폰"), TextClass::Long);
    assert_eq!(classify("“a”b?c!d.e"), TextClass::Short);
}

#[test]
fn test_idempotent_on_corpus_samples() {
    let samples = [
        "대한민국 헌법 제１조",
        "미국 독립선언문",
        "  Ab  ",
        "ｰ～／",
        "\u{FEFF}제l조",
        "a. b, c! d? e",
        "",
    ];
    for sample in samples {
        let once = normalize(sample);
        assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
    }
}
