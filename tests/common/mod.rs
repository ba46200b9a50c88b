//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::sync::mpsc;
use std::sync::Arc;

use shingle::{Document, EngineConfig, Request, Response, SearchEngine, Worker};

// Re-export canonical test utilities from shingle::testing
pub use shingle::testing::{constitution_docs, fast_config, make_docs, stepping_engine, StepClock};

/// Engine with fast search on and the index built over `docs`.
pub fn ready_engine(docs: Vec<Document>) -> SearchEngine {
    let engine = SearchEngine::new(fast_config());
    engine
        .build_index(docs, None, |_| {})
        .expect("index build should succeed");
    engine
}

/// Run `requests` through a worker on this thread and collect every response.
pub fn run_requests(engine: SearchEngine, requests: Vec<Request>) -> Vec<Response> {
    let worker = Worker::new(Arc::new(engine));
    let (tx, rx) = mpsc::channel();
    for request in requests {
        worker.handle(request, &tx);
    }
    drop(tx);
    rx.iter().collect()
}

pub fn search_request(id: &str, query: &str) -> Request {
    Request::Search {
        id: id.to_string(),
        query: query.to_string(),
        limit: None,
        use_fast: None,
    }
}

pub fn build_request(id: &str, documents: Vec<Document>) -> Request {
    Request::BuildIndex {
        id: id.to_string(),
        documents,
        timeout: None,
    }
}

/// Ids of the results, in order.
pub fn ids(results: &[shingle::ScoredDocument]) -> Vec<&str> {
    results.iter().map(|r| r.id.as_str()).collect()
}

/// Default config with a different limit.
pub fn config_with_limit(limit: usize) -> EngineConfig {
    EngineConfig {
        default_limit: limit,
        ..EngineConfig::default()
    }
}
