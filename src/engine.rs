// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search engine: one corpus, one index, one session gate.
//!
//! # Lifecycle
//!
//! ```text
//! not-built ──build──▶ building ──ok──▶ ready
//!                         │
//!                         └──timeout/error──▶ failed (fast search off)
//! ```
//!
//! A build installs the new corpus first, with no index, so the legacy and
//! full-scan tiers answer against the newest documents while the trigram
//! index is being built. The finished index is swapped in as part of a new
//! snapshot only when the whole build succeeded. A failed build leaves the
//! corpus in place and the index absent; the previous index is never
//! restored.
//!
//! Searches clone the current snapshot `Arc` and never block on a build.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, info_span, warn};

use crate::config::{EngineConfig, Flags};
use crate::error::{Error, Result};
use crate::index::{build_trigram_index, BuildOptions, Clock, SystemClock};
use crate::scoring::ranking::apply_margin;
use crate::search::{legacy_search, tiered_search};
use crate::session::SessionGate;
use crate::state::IndexState;
use crate::types::{BuildProgress, Document, IndexStatus, ScoredDocument, SearchOutcome, Used};
use crate::util::normalize::normalize;

/// Top-result agreement between the fast and legacy tiers for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowReport {
    pub fast_top: Option<String>,
    pub legacy_top: Option<String>,
}

impl ShadowReport {
    pub fn compare(fast: &[ScoredDocument], legacy: &[ScoredDocument]) -> Self {
        Self {
            fast_top: fast.first().map(|r| r.id.clone()),
            legacy_top: legacy.first().map(|r| r.id.clone()),
        }
    }

    pub fn agrees(&self) -> bool {
        self.fast_top == self.legacy_top
    }
}

/// Snapshot and status change together under one lock, so `index_ready`
/// never disagrees with what a search would see.
#[derive(Debug, Default)]
struct Published {
    state: Arc<IndexState>,
    status: IndexStatus,
}

impl Published {
    fn new(state: IndexState, status: IndexStatus) -> Self {
        Self {
            state: Arc::new(state),
            status,
        }
    }
}

/// Owns the corpus, the index snapshot and the session gate.
pub struct SearchEngine {
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    published: RwLock<Published>,
    flags: RwLock<Flags>,
    session: SessionGate,
    build_lock: Mutex<()>,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Engine whose build timeouts are measured on `clock`.
    pub fn with_clock(config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        let flags = config.flags;
        Self {
            config,
            clock,
            published: RwLock::new(Published::default()),
            flags: RwLock::new(flags),
            session: SessionGate::new(),
            build_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the runtime flags. Takes effect for the next search.
    pub fn set_flags(&self, flags: Flags) {
        debug!(
            enable_fast_search = flags.enable_fast_search,
            enable_shadow_test = flags.enable_shadow_test,
            "flags updated"
        );
        *self.flags.write() = flags;
    }

    pub fn flags(&self) -> Flags {
        *self.flags.read()
    }

    pub fn status(&self) -> IndexStatus {
        self.published.read().status
    }

    /// Can fast search run right now?
    pub fn index_ready(&self) -> bool {
        let published = self.published.read();
        debug_assert_eq!(published.status.is_ready(), published.state.is_indexed());
        published.status.is_ready()
    }

    /// The snapshot a search starting now would see.
    pub fn snapshot(&self) -> Arc<IndexState> {
        Arc::clone(&self.published.read().state)
    }

    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    /// Replace the corpus and build its trigram index.
    ///
    /// `timeout_ms` overrides the configured budget. Returns the number of
    /// indexed documents. Concurrent builds run one after the other.
    pub fn build_index(
        &self,
        documents: Vec<Document>,
        timeout_ms: Option<u64>,
        on_progress: impl FnMut(BuildProgress),
    ) -> Result<usize> {
        let _build = self.build_lock.lock();

        let documents: Arc<[Document]> = documents.into();
        let options = BuildOptions {
            timeout_ms: timeout_ms.unwrap_or(self.config.index_timeout_ms),
            progress_interval: self.config.progress_interval,
        };

        let span = info_span!("build_index", docs = documents.len(), timeout_ms = options.timeout_ms);
        let _enter = span.enter();

        *self.published.write() = Published::new(
            IndexState::unindexed(Arc::clone(&documents)),
            IndexStatus::Building,
        );

        match build_trigram_index(&documents, &options, self.clock.as_ref(), on_progress) {
            Ok(index) => {
                let size = index.len();
                info!(docs = size, vocabulary = index.vocabulary_len(), "index ready");
                *self.published.write() =
                    Published::new(IndexState::indexed(documents, index), IndexStatus::Ready);
                Ok(size)
            }
            Err(err) => {
                warn!(error = %err, "index build failed; legacy search stays in use");
                self.published.write().status = IndexStatus::Failed;
                Err(err)
            }
        }
    }

    /// Run one search against the current snapshot.
    ///
    /// `limit` defaults to the configured limit and must not be zero.
    /// `use_fast` defaults to the `enableFastSearch` flag; fast search is in
    /// effect only if it is requested and the index is ready.
    pub fn search(
        &self,
        query: &str,
        limit: Option<usize>,
        use_fast: Option<bool>,
    ) -> Result<SearchOutcome> {
        let limit = limit.unwrap_or(self.config.default_limit);
        if limit == 0 {
            return Err(Error::search_failure("limit must be at least 1"));
        }

        let snapshot = self.snapshot();
        let flags = self.flags();
        let fast = use_fast.unwrap_or(flags.enable_fast_search) && snapshot.is_indexed();
        let used = if fast { Used::Fast } else { Used::Legacy };

        let normalized = normalize(query);
        let span = info_span!("search", query = %normalized, limit, fast);
        let _enter = span.enter();

        if normalized.is_empty() {
            debug!("empty query after normalization");
            return Ok(SearchOutcome::empty(used));
        }

        let (mut results, tier) = tiered_search(&snapshot, &normalized, limit, fast);
        apply_margin(&mut results);

        if flags.enable_shadow_test && used == Used::Fast {
            let legacy = legacy_search(&snapshot, &normalized, limit);
            let report = ShadowReport::compare(&results, &legacy);
            info!(
                agree = report.agrees(),
                fast_top = ?report.fast_top,
                legacy_top = ?report.legacy_top,
                tier = %tier,
                "shadow comparison"
            );
        }

        Ok(SearchOutcome {
            results,
            used,
            tier: Some(tier),
        })
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchTier;

    fn corpus() -> Vec<Document> {
        vec![
            Document::new("1", "대한민국 헌법 제1조"),
            Document::new("2", "미국 독립선언문"),
        ]
    }

    #[test]
    fn starts_not_built_and_searches_anyway() {
        let engine = SearchEngine::default();
        assert_eq!(engine.status(), IndexStatus::NotBuilt);
        let outcome = engine.search("anything", None, Some(true)).unwrap();
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.used, Used::Legacy);
        assert_eq!(outcome.tier, Some(SearchTier::FullScan));
    }

    #[test]
    fn build_reports_size_and_becomes_ready() {
        let engine = SearchEngine::default();
        let mut last = None;
        let size = engine
            .build_index(corpus(), None, |p| last = Some(p))
            .unwrap();
        assert_eq!(size, 2);
        assert!(engine.index_ready());
        assert_eq!(last, Some(BuildProgress { processed: 2, total: 2 }));
    }

    #[test]
    fn readiness_matches_the_snapshot() {
        let engine = SearchEngine::default();
        engine
            .build_index(corpus(), None, |_| {
                assert!(!engine.index_ready());
                let during = engine.snapshot();
                assert!(!during.is_indexed());
                assert_eq!(during.len(), 2);
            })
            .unwrap();
        assert!(engine.index_ready());
        assert!(engine.snapshot().is_indexed());

        let failing = crate::testing::stepping_engine(EngineConfig::default(), 1.0);
        assert!(failing.build_index(corpus(), Some(0), |_| {}).is_err());
        assert_eq!(failing.status(), IndexStatus::Failed);
        assert!(!failing.index_ready());
        assert!(!failing.snapshot().is_indexed());
        assert_eq!(failing.snapshot().len(), 2);
    }

    #[test]
    fn indexed_snapshot_is_never_seen_before_ready() {
        let texts: Vec<String> = (0..2_000).map(|i| format!("문서 번호 {}", i)).collect();
        let docs: Vec<Document> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Document::new(i.to_string(), t.as_str()))
            .collect();
        let engine = SearchEngine::default();

        std::thread::scope(|scope| {
            let watcher = scope.spawn(|| loop {
                if engine.snapshot().is_indexed() {
                    assert!(engine.index_ready());
                    break;
                }
                std::thread::yield_now();
            });
            engine.build_index(docs, None, |_| {}).unwrap();
            watcher.join().unwrap();
        });
    }

    #[test]
    fn zero_limit_is_a_search_failure() {
        let engine = SearchEngine::default();
        let err = engine.search("x", Some(0), None).unwrap_err();
        assert!(matches!(err, Error::SearchFailure(_)));
    }

    #[test]
    fn empty_query_short_circuits() {
        let engine = SearchEngine::default();
        engine.build_index(corpus(), None, |_| {}).unwrap();
        let outcome = engine.search(" ?! ", None, Some(true)).unwrap();
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.used, Used::Fast);
        assert_eq!(outcome.tier, None);
    }

    #[test]
    fn flags_default_use_fast() {
        let engine = SearchEngine::default();
        engine.build_index(corpus(), None, |_| {}).unwrap();
        assert_eq!(engine.search("헌법", None, None).unwrap().used, Used::Legacy);

        engine.set_flags(Flags {
            enable_fast_search: true,
            enable_shadow_test: true,
        });
        assert_eq!(engine.search("헌법", None, None).unwrap().used, Used::Fast);
        // Caller preference still wins
        assert_eq!(engine.search("헌법", None, Some(false)).unwrap().used, Used::Legacy);
    }

    #[test]
    fn shadow_report_compares_tops() {
        let a = ScoredDocument::from_document(&Document::new("1", "a"), 1.0, 1.0, 0);
        let b = ScoredDocument::from_document(&Document::new("2", "b"), 1.0, 1.0, 0);
        assert!(ShadowReport::compare(&[a.clone()], &[a.clone(), b.clone()]).agrees());
        assert!(!ShadowReport::compare(&[a], &[b]).agrees());
        assert!(ShadowReport::compare(&[], &[]).agrees());
    }
}
