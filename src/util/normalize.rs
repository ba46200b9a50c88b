// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text normalization: make OCR output and clean text comparable.
//!
//! OCR hands us fullwidth digits, zero-width joiners pasted from chat apps,
//! five different dashes, and stray punctuation. None of that should decide
//! whether two strings match. Everything goes through [`normalize`] before
//! shingling, edit distance, or substring checks on the query side.
//!
//! # Pipeline
//!
//! 1. NFKC (compatibility decomposition + canonical recomposition)
//! 2. Drop zero-width characters (ZWSP, ZWNJ, ZWJ, BOM)
//! 3. Fold confusables to ASCII, one left-to-right pass over [`CONFUSABLES`]
//! 4. Drop punctuation in [`STRIPPED_PUNCTUATION`]
//! 5. Lowercase
//! 6. Whitespace policy: fewer than [`SHORT_TEXT_LEN`] non-whitespace chars
//!    keeps single spaces (two-word fragments need them), otherwise all
//!    whitespace goes
//!
//! Lowercasing happens before the length check so that a second pass sees the
//! same length as the first. Together with a final recomposition this keeps
//! `normalize(normalize(x)) == normalize(x)`.

use unicode_normalization::{is_nfkc, UnicodeNormalization};

/// Texts with fewer non-whitespace characters than this keep their spaces.
pub const SHORT_TEXT_LEN: usize = 6;

/// Zero-width characters that OCR and copy/paste leave behind.
pub const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Visually confusable characters and their ASCII replacement.
pub const CONFUSABLES: &[(char, char)] = &[
    ('\u{FE63}', '-'), // ﹣ small hyphen-minus
    ('\u{FF0D}', '-'), // － fullwidth hyphen-minus
    ('\u{2015}', '-'), // ― horizontal bar
    ('\u{FF70}', '-'), // ｰ halfwidth prolonged sound mark
    ('\u{30FC}', '-'), // ー prolonged sound mark
    ('\u{FF5E}', '~'), // ～ fullwidth tilde
    ('\u{FE57}', '!'), // ﹗ small exclamation
    ('\u{FF01}', '!'), // ！ fullwidth exclamation
    ('\u{FE58}', '-'), // ﹘ small em dash
    ('\u{2012}', '-'), // ‒ figure dash
    ('\u{FF0F}', '/'), // ／ fullwidth solidus
    ('\u{29F8}', '/'), // ⧸ big solidus
    ('\u{2215}', '/'), // ∕ division slash
    ('\u{FF10}', '0'),
    ('\u{FF11}', '1'),
    ('\u{FF12}', '2'),
    ('\u{FF13}', '3'),
    ('\u{FF14}', '4'),
    ('\u{FF15}', '5'),
    ('\u{FF16}', '6'),
    ('\u{FF17}', '7'),
    ('\u{FF18}', '8'),
    ('\u{FF19}', '9'),
];

/// Punctuation removed before comparison, straight and curly quotes included.
pub const STRIPPED_PUNCTUATION: &[char] = &[
    '?', '.', ',', '!', ';', ':', '(', ')', '{', '}', '[', ']', '\'', '"', '\u{FF02}',
    '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}',
];

/// Short texts keep word structure; long texts are compared dense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextClass {
    Short,
    Long,
}

/// Normalize a string for matching.
///
/// Deterministic and idempotent. Never fails; the empty string normalizes to
/// the empty string.
///
/// ```
/// use shingle::normalize;
///
/// assert_eq!(normalize("１２３"), normalize("123"));
/// assert_eq!(normalize("  Hello,   World!  "), "helloworld");
/// assert_eq!(normalize("안 드"), "안 드");
/// ```
pub fn normalize(value: &str) -> String {
    let folded = fold(value);

    let normalized = match classify_folded(&folded) {
        TextClass::Short => folded.split_whitespace().collect::<Vec<_>>().join(" "),
        TextClass::Long => folded.chars().filter(|c| !c.is_whitespace()).collect(),
    };

    recompose(normalized)
}

/// Which whitespace policy [`normalize`] applies to this text.
///
/// Decided on the length *after* whitespace removal: `"안 드 로 이 드"` is
/// short even though it is nine characters wide.
pub fn classify(value: &str) -> TextClass {
    classify_folded(&fold(value))
}

/// Steps 1-5: everything except the whitespace policy.
fn fold(value: &str) -> String {
    // NFKC output is already canonically composed, so a separate NFC pass is a no-op.
    value
        .nfkc()
        .filter(|c| !is_zero_width(*c))
        .map(fold_confusable)
        .filter(|c| !is_stripped_punctuation(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn classify_folded(folded: &str) -> TextClass {
    let dense_len = folded.chars().filter(|c| !c.is_whitespace()).count();
    if dense_len < SHORT_TEXT_LEN {
        TextClass::Short
    } else {
        TextClass::Long
    }
}

/// Removing punctuation or spaces can leave a base letter next to a combining
/// mark that belonged to something else; compose those pairs again.
fn recompose(text: String) -> String {
    if is_nfkc(&text) {
        text
    } else {
        text.nfkc().collect()
    }
}

#[inline]
pub fn is_zero_width(c: char) -> bool {
    ZERO_WIDTH.contains(&c)
}

#[inline]
pub fn is_stripped_punctuation(c: char) -> bool {
    STRIPPED_PUNCTUATION.contains(&c)
}

/// Replace a confusable character with its ASCII twin, or return it unchanged.
#[inline]
pub fn fold_confusable(c: char) -> char {
    CONFUSABLES
        .iter()
        .find(|(from, _)| *from == c)
        .map_or(c, |(_, to)| *to)
}

/// Length in Unicode scalar values. All length thresholds use this.
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
