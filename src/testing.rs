// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::engine::SearchEngine;
use crate::index::Clock;
use crate::types::Document;

/// Documents with ids `"1"`, `"2"`, ... in order.
pub fn make_docs(texts: &[&str]) -> Vec<Document> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| Document::new((i + 1).to_string(), *text))
        .collect()
}

/// The two-document Korean corpus used by the end-to-end tests.
pub fn constitution_docs() -> Vec<Document> {
    make_docs(&["대한민국 헌법 제1조", "미국 독립선언문"])
}

/// Clock that advances by a fixed step every time it is read.
///
/// With a step of 1 ms and a timeout of 0, a build fails on its first
/// document, no matter how fast the machine is.
#[derive(Debug)]
pub struct StepClock {
    now_us: AtomicU64,
    step_us: u64,
}

impl StepClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            now_us: AtomicU64::new(0),
            step_us: (step_ms * 1000.0) as u64,
        }
    }
}

impl Clock for StepClock {
    fn now_ms(&self) -> f64 {
        let now = self.now_us.fetch_add(self.step_us, Ordering::SeqCst);
        now as f64 / 1000.0
    }
}

/// Engine on a [`StepClock`], flags from `config`.
pub fn stepping_engine(config: EngineConfig, step_ms: f64) -> SearchEngine {
    SearchEngine::with_clock(config, Arc::new(StepClock::new(step_ms)))
}

/// Config with fast search enabled and everything else default.
pub fn fast_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.flags.enable_fast_search = true;
    config
}
