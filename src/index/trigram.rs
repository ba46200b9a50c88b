// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Trigram shingles and the inverted index over them.
//!
//! A shingle is three consecutive characters of normalized text. Two strings
//! that share most of their shingles are probably the same string with a few
//! OCR mistakes, and the posting list lets us find those strings without
//! comparing the query against every document.
//!
//! # Invariants
//!
//! 1. **ALIGNED**: `normalized`, `shingles` and the corpus have one entry per
//!    document, in corpus order.
//! 2. **NON_EMPTY**: every document has at least one shingle. Texts shorter
//!    than three characters are right-padded with [`PAD_CHAR`].
//! 3. **POSTING_EXACT**: doc `d` is in `postings[s]` iff `s ∈ shingles[d]`.
//! 4. **POSTING_SORTED**: posting lists are strictly increasing (documents are
//!    inserted in order, each shingle set has no duplicates).

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use tracing::debug;

use super::clock::{Clock, Deadline};
use crate::contracts;
use crate::error::{Error, Result};
use crate::types::{BuildProgress, Document};
use crate::util::normalize::normalize;

/// Shingle width in characters.
pub const SHINGLE_LEN: usize = 3;

/// Filler appended to texts shorter than [`SHINGLE_LEN`].
pub const PAD_CHAR: char = '_';

/// Three consecutive characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Trigram(pub [char; SHINGLE_LEN]);

impl Trigram {
    pub fn from_str_exact(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let trigram = Trigram([chars.next()?, chars.next()?, chars.next()?]);
        chars.next().is_none().then_some(trigram)
    }
}

impl fmt::Display for Trigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0 {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Shingle an already-normalized string: stride-1 window of width 3.
///
/// ```
/// use shingle::shingles;
///
/// assert_eq!(shingles("abcd").len(), 2);
/// assert_eq!(shingles("").len(), 1); // "___"
/// ```
pub fn shingles(normalized: &str) -> HashSet<Trigram> {
    let mut chars: Vec<char> = normalized.chars().collect();
    while chars.len() < SHINGLE_LEN {
        chars.push(PAD_CHAR);
    }

    chars
        .windows(SHINGLE_LEN)
        .map(|w| Trigram([w[0], w[1], w[2]]))
        .collect()
}

/// Knobs for one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Abort once more than this many milliseconds have passed
    pub timeout_ms: u64,
    /// Report progress after every this-many documents
    pub progress_interval: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            timeout_ms: crate::config::DEFAULT_INDEX_TIMEOUT_MS,
            progress_interval: crate::config::DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Normalized text, shingle sets and posting list for one corpus.
///
/// Immutable once built. A rebuild produces a new value; nothing here is
/// ever patched in place.
#[derive(Debug, Clone, Default)]
pub struct TrigramIndex {
    pub(crate) normalized: Vec<String>,
    pub(crate) shingles: Vec<HashSet<Trigram>>,
    pub(crate) postings: HashMap<Trigram, Vec<u32>>,
}

impl TrigramIndex {
    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Number of distinct shingles in the posting list.
    pub fn vocabulary_len(&self) -> usize {
        self.postings.len()
    }

    pub fn normalized(&self, doc: usize) -> Option<&str> {
        self.normalized.get(doc).map(String::as_str)
    }

    pub fn shingles_of(&self, doc: usize) -> Option<&HashSet<Trigram>> {
        self.shingles.get(doc)
    }

    /// Documents containing `trigram`, ascending.
    pub fn postings(&self, trigram: &Trigram) -> &[u32] {
        self.postings.get(trigram).map_or(&[], Vec::as_slice)
    }

    /// Documents sharing at least one shingle with the query, mapped to the
    /// number of shingles they share. Ordered by document index.
    pub fn candidates(&self, query: &HashSet<Trigram>) -> BTreeMap<usize, usize> {
        let mut shared: BTreeMap<usize, usize> = BTreeMap::new();
        for trigram in query {
            for &doc in self.postings(trigram) {
                *shared.entry(doc as usize).or_insert(0) += 1;
            }
        }
        shared
    }
}

/// Build the trigram index for `documents`, in order.
///
/// Checks the deadline before every document and reports progress after
/// document 0, every `progress_interval`-th document, and the last one.
/// On error nothing is returned; the caller keeps whatever it had.
pub fn build_trigram_index(
    documents: &[Document],
    options: &BuildOptions,
    clock: &dyn Clock,
    mut on_progress: impl FnMut(BuildProgress),
) -> Result<TrigramIndex> {
    let total = documents.len();
    if u32::try_from(total).is_err() {
        return Err(Error::build_failure(format!(
            "{} documents exceed the posting list capacity of {}",
            total,
            u32::MAX
        )));
    }

    let deadline = Deadline::start(clock, options.timeout_ms);
    let interval = options.progress_interval.max(1);

    let mut index = TrigramIndex {
        normalized: Vec::with_capacity(total),
        shingles: Vec::with_capacity(total),
        postings: HashMap::new(),
    };

    for (doc_idx, document) in documents.iter().enumerate() {
        if let Some(elapsed_ms) = deadline.exceeded() {
            debug!(processed = doc_idx, total, elapsed_ms, "trigram build over budget");
            return Err(Error::IndexBuildTimeout {
                elapsed_ms,
                timeout_ms: deadline.timeout_ms(),
            });
        }

        let normalized = normalize(&document.text);
        let doc_shingles = shingles(&normalized);
        for trigram in &doc_shingles {
            index
                .postings
                .entry(*trigram)
                .or_default()
                .push(doc_idx as u32);
        }
        index.normalized.push(normalized);
        index.shingles.push(doc_shingles);

        if doc_idx % interval == 0 || doc_idx + 1 == total {
            on_progress(BuildProgress {
                processed: doc_idx + 1,
                total,
            });
        }
    }

    contracts::check_trigram_index(&index, total);
    Ok(index)
}
