// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Document files for the `search` command.
//!
//! Two shapes are accepted:
//!
//! - a plain array of `{ "id", "text", "payload"? }` documents
//! - a question/answer dump, `{ "metadata": {...}, "data": [{ "question",
//!   "answer", "index", "sheet" }] }`, where each entry becomes a document
//!   with id `"<sheet>-<index>"`, the question as text, and the whole entry
//!   as payload

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use shingle::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct QaEntry {
    question: String,
    #[serde(default)]
    answer: String,
    index: u64,
    sheet: String,
}

#[derive(Debug, Deserialize)]
struct QaDump {
    data: Vec<QaEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CorpusFile {
    Documents(Vec<Document>),
    QaDump(QaDump),
}

pub fn parse_documents(json: &str) -> Result<Vec<Document>> {
    let file: CorpusFile = serde_json::from_str(json)
        .context("expected a document array or an object with a `data` array")?;

    match file {
        CorpusFile::Documents(documents) => Ok(documents),
        CorpusFile::QaDump(dump) => dump
            .data
            .into_iter()
            .map(|entry| -> Result<Document> {
                let payload = serde_json::to_value(&entry)?;
                Ok(Document::new(format!("{}-{}", entry.sheet, entry.index), entry.question)
                    .with_payload(payload))
            })
            .collect(),
    }
}

pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_documents(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
