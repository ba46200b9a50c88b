// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly binding: the worker, callable from a browser Web Worker.
//!
//! The JS side owns the event loop. Each `postMessage` call handles one
//! request to completion and hands every response to the callback, in order.
//! Malformed messages produce no callback at all.
//!
//! ```js
//! const worker = new ShingleWorker({ flags: { enableFastSearch: true } });
//! worker.postMessage({ type: "build-index", id: "b", documents }, (msg) => self.postMessage(msg));
//! ```

use std::sync::mpsc;
use std::sync::Arc;

use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use tracing::debug;
use wasm_bindgen::prelude::*;

use crate::config::{EngineConfig, Flags};
use crate::engine::SearchEngine;
use crate::index::Clock;
use crate::protocol::{request_from_value, Response};
use crate::worker::Worker;

/// `Instant` is unavailable on `wasm32-unknown-unknown`; `Date.now()` is.
struct DateClock;

impl Clock for DateClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

fn to_js(response: &Response) -> Result<JsValue, JsValue> {
    // json_compatible: payload objects become plain JS objects, not Maps
    response
        .serialize(&Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_json(value: JsValue) -> Result<serde_json::Value, JsValue> {
    from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(err: crate::error::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Search worker exported to JavaScript.
#[wasm_bindgen]
pub struct ShingleWorker {
    worker: Worker,
}

#[wasm_bindgen]
impl ShingleWorker {
    /// Create a worker. `config` is an optional `EngineConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ShingleWorker, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            EngineConfig::from_json_value(to_json(config)?).map_err(to_js_error)?
        };

        let engine = SearchEngine::with_clock(config, Arc::new(DateClock));
        Ok(ShingleWorker {
            worker: Worker::new(Arc::new(engine)),
        })
    }

    /// Handle one message, calling `callback(response)` for each response.
    #[wasm_bindgen(js_name = postMessage)]
    pub fn post_message(&self, message: JsValue, callback: &js_sys::Function) -> Result<(), JsValue> {
        let value: serde_json::Value = match from_value(message) {
            Ok(value) => value,
            Err(err) => {
                debug!(error = %err, "dropping non-JSON message");
                return Ok(());
            }
        };
        let request = match request_from_value(value) {
            Ok(request) => request,
            Err(err) => {
                debug!(error = %err, "dropping unsupported message");
                return Ok(());
            }
        };

        let (tx, rx) = mpsc::channel();
        self.worker.handle(request, &tx);
        drop(tx);

        for response in rx {
            callback.call1(&JsValue::NULL, &to_js(&response)?)?;
        }
        Ok(())
    }

    /// Replace the runtime flags (`{ enableFastSearch, enableShadowTest }`).
    #[wasm_bindgen(js_name = setFlags)]
    pub fn set_flags(&self, flags: JsValue) -> Result<(), JsValue> {
        let flags = Flags::from_json_value(to_json(flags)?).map_err(to_js_error)?;
        self.worker.set_flags(flags);
        Ok(())
    }

    /// Is the trigram index ready?
    #[wasm_bindgen(getter, js_name = indexReady)]
    pub fn index_ready(&self) -> bool {
        self.worker.engine().index_ready()
    }
}
