// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The shapes that cross the engine boundary.
//!
//! Documents go in, scored documents come out. Field names are the external
//! contract (camelCase on the wire), so renaming anything here is a protocol
//! change.
//!
//! # Invariants
//!
//! - **Document**: never mutated once handed to the engine. Its position in the
//!   corpus is the join key between raw text, normalized text, and shingles.
//! - **ScoredDocument**: `margin` is identical across every row of one response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// One searchable record.
///
/// `payload` is opaque: the engine carries it through to results untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// A ranked hit, uniform across every tier.
///
/// Tiers that do not compute a field leave it at zero: the legacy tier reports
/// `dice = score` and `distance = 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: String,
    pub text: String,
    pub score: f64,
    pub dice: f64,
    pub distance: usize,
    pub margin: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl ScoredDocument {
    pub(crate) fn from_document(doc: &Document, score: f64, dice: f64, distance: usize) -> Self {
        Self {
            id: doc.id.clone(),
            text: doc.text.clone(),
            score,
            dice,
            distance,
            margin: 0.0,
            payload: doc.payload.clone(),
        }
    }
}

// =============================================================================
// SEARCH OUTCOME
// =============================================================================

/// Which retrieval mode a response reports on the wire.
///
/// `Fast` means fast search was in effect for the request (caller preference
/// and a ready index), not that the trigram tier produced the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Used {
    Fast,
    Legacy,
}

/// The tier that actually produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchTier {
    /// Trigram candidates refined by edit distance
    Fast,
    /// Case-insensitive substring containment
    Legacy,
    /// Edit distance against every document
    FullScan,
}

impl SearchTier {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchTier::Fast => "fast",
            SearchTier::Legacy => "legacy",
            SearchTier::FullScan => "full-scan",
        }
    }
}

impl std::fmt::Display for SearchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a search call produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub results: Vec<ScoredDocument>,
    pub used: Used,
    /// `None` when the normalized query was empty and no tier ran.
    pub tier: Option<SearchTier>,
}

impl SearchOutcome {
    pub(crate) fn empty(used: Used) -> Self {
        Self {
            results: Vec::new(),
            used,
            tier: None,
        }
    }

    /// Shared `margin` value of this response (0 when empty).
    pub fn margin(&self) -> f64 {
        self.results.first().map_or(0.0, |r| r.margin)
    }
}

// =============================================================================
// INDEX LIFECYCLE
// =============================================================================

/// Where the trigram index is in its lifecycle.
///
/// `Failed` behaves like `NotBuilt` for search purposes: only the legacy and
/// full-scan tiers are available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexStatus {
    #[default]
    NotBuilt,
    Building,
    Ready,
    Failed,
}

impl IndexStatus {
    pub fn is_ready(self) -> bool {
        self == IndexStatus::Ready
    }
}

/// Progress notification for a running build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildProgress {
    /// Documents processed so far
    pub processed: usize,
    pub total: usize,
}
