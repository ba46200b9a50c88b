// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error kinds surfaced by the engine.
//!
//! Build errors are fatal to one build attempt and leave the index not-ready.
//! Search errors are per-request and never touch index state. Unsupported
//! messages exist so the protocol layer can name what it dropped; they are
//! logged, never sent back.

use thiserror::Error;

/// Everything that can go wrong inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The build ran past its wall-clock budget.
    #[error("index build timed out after {elapsed_ms} ms (limit {timeout_ms} ms); legacy search stays in use")]
    IndexBuildTimeout {
        /// Milliseconds elapsed when the check fired
        elapsed_ms: u64,
        /// Configured budget
        timeout_ms: u64,
    },

    /// Normalizing or shingling the corpus failed.
    #[error("index build failed: {0}")]
    IndexBuildFailure(String),

    /// Scoring or searching failed for one request.
    #[error("search failed: {0}")]
    SearchFailure(String),

    /// A message the worker does not understand.
    #[error("unsupported message: {0}")]
    UnsupportedMessage(String),

    /// Engine configuration that cannot be used.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn build_failure(message: impl Into<String>) -> Self {
        Self::IndexBuildFailure(message.into())
    }

    pub fn search_failure(message: impl Into<String>) -> Self {
        Self::SearchFailure(message.into())
    }

    /// Did this error come out of an index build?
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            Self::IndexBuildTimeout { .. } | Self::IndexBuildFailure(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
