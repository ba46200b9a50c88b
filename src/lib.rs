// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Trigram fuzzy search for short, noisy queries.
//!
//! Built for the case where the query came out of OCR: a few words of Korean
//! or mixed-script text with a wrong digit, a fullwidth dash, or a zero-width
//! joiner in the middle. The corpus is small (low thousands of documents) and
//! lives in memory.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────────────┐
//! │ normalize.rs │───▶│  trigram.rs  │───▶│ search/{fast,legacy,scan}│
//! │ (NFKC, fold, │    │ (shingles,   │    │   tiered.rs (fallback)   │
//! │  whitespace) │    │  postings)   │    └────────────┬─────────────┘
//! └──────────────┘    └──────────────┘                 │
//!                                                       ▼
//!   protocol.rs ──▶ worker.rs ──▶ engine.rs ──▶ session.rs (last-wins gate)
//! ```
//!
//! # Retrieval tiers
//!
//! | Tier      | Needs index | Matches by                          |
//! |-----------|-------------|-------------------------------------|
//! | fast      | yes         | shared trigrams, then edit distance |
//! | legacy    | no          | case-insensitive substring          |
//! | full scan | no          | edit distance against every doc     |
//!
//! Short queries (under six characters after normalization) skip the fast
//! tier. See [`search::tiered`] for the fallback rules.
//!
//! # Usage
//!
//! ```
//! use shingle::{Document, EngineConfig, SearchEngine};
//!
//! let engine = SearchEngine::new(EngineConfig::default());
//! engine
//!     .build_index(
//!         vec![
//!             Document::new("1", "대한민국 헌법 제1조"),
//!             Document::new("2", "미국 독립선언문"),
//!         ],
//!         None,
//!         |_| {},
//!     )
//!     .unwrap();
//!
//! let outcome = engine.search("헌법제1조", None, Some(true)).unwrap();
//! assert_eq!(outcome.results[0].id, "1");
//! ```

pub mod config;
pub mod contracts;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod protocol;
pub mod scoring;
pub mod search;
pub mod session;
pub mod state;
pub mod testing;
pub mod types;
pub mod util;
pub mod worker;

#[cfg(feature = "wasm")]
mod wasm;

// Re-exports for public API
pub use config::{EngineConfig, Flags, DEFAULT_INDEX_TIMEOUT_MS, DEFAULT_PROGRESS_INTERVAL};
pub use engine::{SearchEngine, ShadowReport};
pub use error::{Error, Result};
pub use fuzzy::{levenshtein, levenshtein_bounded, similarity};
pub use index::{build_trigram_index, shingles, BuildOptions, Clock, SystemClock, Trigram, TrigramIndex};
pub use protocol::{parse_request, Request, Response};
pub use scoring::ranking::{apply_margin, margin, rank};
pub use scoring::{composite_score, dice_coefficient, QueryClass, DEFAULT_LIMIT};
pub use search::{fast_search, full_scan, legacy_search, tiered_search};
pub use session::{SessionGate, Ticket};
pub use state::IndexState;
pub use types::{
    BuildProgress, Document, IndexStatus, ScoredDocument, SearchOutcome, SearchTier, Used,
};
pub use util::normalize::{classify, normalize, TextClass};
pub use worker::{Worker, WorkerHandle, WorkerLoop};
