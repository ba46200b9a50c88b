// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The message contract between a caller and the worker.
//!
//! Messages are JSON objects tagged by `type`. Field names are camelCase and
//! are the external contract; renaming one breaks every caller.
//!
//! ```text
//! build-index ──▶ index-progress* ──▶ index-ready | search-error
//! search      ──▶ search-result | search-error | (nothing, if superseded)
//! cancel      ──▶ (nothing)
//! get-flags   ──▶ flags
//! ```
//!
//! Anything that does not parse into a [`Request`] is unsupported and gets
//! dropped without a reply, so an older worker tolerates a newer caller.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{BuildProgress, Document, ScoredDocument, Used};

/// Caller → worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Request {
    BuildIndex {
        id: String,
        documents: Vec<Document>,
        /// Build budget in milliseconds
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout: Option<u64>,
    },
    Search {
        id: String,
        query: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<NonZeroUsize>,
        #[serde(default, rename = "useFast", skip_serializing_if = "Option::is_none")]
        use_fast: Option<bool>,
    },
    Cancel {
        id: String,
    },
    GetFlags {
        id: String,
    },
}

impl Request {
    pub fn id(&self) -> &str {
        match self {
            Request::BuildIndex { id, .. }
            | Request::Search { id, .. }
            | Request::Cancel { id }
            | Request::GetFlags { id } => id,
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Request::BuildIndex { .. } => "build-index",
            Request::Search { .. } => "search",
            Request::Cancel { .. } => "cancel",
            Request::GetFlags { .. } => "get-flags",
        }
    }
}

/// Worker → caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Response {
    IndexProgress {
        id: String,
        progress: usize,
        total: usize,
    },
    IndexReady {
        id: String,
        size: usize,
    },
    SearchResult {
        id: String,
        results: Vec<ScoredDocument>,
        used: Used,
    },
    SearchError {
        id: String,
        error: String,
    },
    Flags {
        id: String,
        #[serde(rename = "enableFastSearch")]
        enable_fast_search: bool,
        #[serde(rename = "indexReady")]
        index_ready: bool,
    },
}

impl Response {
    pub fn id(&self) -> &str {
        match self {
            Response::IndexProgress { id, .. }
            | Response::IndexReady { id, .. }
            | Response::SearchResult { id, .. }
            | Response::SearchError { id, .. }
            | Response::Flags { id, .. } => id,
        }
    }

    /// Is this the last message a request will produce?
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Response::IndexProgress { .. })
    }

    pub(crate) fn progress(id: &str, progress: BuildProgress) -> Self {
        Response::IndexProgress {
            id: id.to_string(),
            progress: progress.processed,
            total: progress.total,
        }
    }

    pub(crate) fn error(id: &str, error: &Error) -> Self {
        Response::SearchError {
            id: id.to_string(),
            error: error.to_string(),
        }
    }
}

/// Parse one message. Anything malformed becomes [`Error::UnsupportedMessage`].
pub fn parse_request(json: &str) -> Result<Request> {
    serde_json::from_str(json).map_err(|e| Error::UnsupportedMessage(e.to_string()))
}

/// Same as [`parse_request`] for an already-decoded JSON value.
pub fn request_from_value(value: serde_json::Value) -> Result<Request> {
    serde_json::from_value(value).map_err(|e| Error::UnsupportedMessage(e.to_string()))
}
