// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One immutable snapshot of everything a search reads.
//!
//! The engine swaps whole snapshots behind a lock; a search clones the `Arc`
//! and works on its copy. A half-built index is never reachable from here:
//! `index` is either absent or complete for exactly these `documents`.

use std::borrow::Cow;
use std::sync::Arc;

use crate::index::TrigramIndex;
use crate::types::Document;
use crate::util::normalize::normalize;

/// Corpus plus, once a build has succeeded, its trigram index.
#[derive(Debug, Clone, Default)]
pub struct IndexState {
    documents: Arc<[Document]>,
    index: Option<Arc<TrigramIndex>>,
}

impl IndexState {
    /// A corpus without an index: legacy and full-scan tiers only.
    pub fn unindexed(documents: Arc<[Document]>) -> Self {
        Self {
            documents,
            index: None,
        }
    }

    /// A corpus with the index built from it.
    pub fn indexed(documents: Arc<[Document]>, index: TrigramIndex) -> Self {
        debug_assert_eq!(documents.len(), index.len());
        Self {
            documents,
            index: Some(Arc::new(index)),
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn index(&self) -> Option<&TrigramIndex> {
        self.index.as_deref()
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Normalized text of document `doc`: cached when indexed, computed otherwise.
    pub fn normalized(&self, doc: usize) -> Cow<'_, str> {
        if let Some(text) = self.index().and_then(|index| index.normalized(doc)) {
            return Cow::Borrowed(text);
        }
        self.documents
            .get(doc)
            .map_or(Cow::Borrowed(""), |d| Cow::Owned(normalize(&d.text)))
    }
}
