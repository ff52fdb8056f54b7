// SPDX-License-Identifier: MIT OR Apache-2.0

//! The decorator against a backend that only implements the required part of the contract.

use std::error::Error;
use std::sync::{Arc, Mutex};
use tagwise::tag::{decode_context, encode_context};
use tagwise::{Arg, ContextMap, Level, LogRecord, Logger, SLACK, Tag, TaggedLogger};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;

/// Keeps `(level, tag, message)` for every call.  Relies on the trait's defaults for the rest.
#[derive(Debug, Default)]
struct Minimal {
    calls: Mutex<Vec<(Level, Option<Tag>, String)>>,
}

impl Logger for Minimal {
    fn name(&self) -> &str {
        "minimal"
    }

    fn is_enabled(&self, level: Level, _tag: Option<&Tag>) -> bool {
        level >= Level::Info
    }

    fn log(
        &self,
        level: Level,
        tag: Option<&Tag>,
        message: &str,
        args: &[Arg],
        _error: Option<&(dyn Error + 'static)>,
    ) {
        let message = tagwise::format_message(message, args);
        self.calls.lock().unwrap().push((level, tag.cloned(), message));
    }
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn minimal_backends_get_formatted_messages() {
    let backend = Arc::new(Minimal::default());
    let logger = TaggedLogger::with_context(backend.clone(), &ContextMap::from([("svc", "api")]));

    logger.debug("not enabled", ());
    logger.info("served {} in {}ms", ("/health", 3));
    logger
        .at_warn()
        .tag(SLACK)
        .key_value("route", "/login")
        .log("slow");

    let calls = backend.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, Level::Info);
    assert_eq!(calls[0].2, "svc=api served /health in 3ms");
    assert_eq!(calls[1].2, "SLACK svc=api route=/login slow");
    let tag = calls[1].1.as_ref().unwrap();
    assert!(tag.contains("SLACK"));
    assert_eq!(decode_context(Some(tag)), ContextMap::from([("svc", "api")]));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn default_submit_flattens() {
    let backend = Minimal::default();
    let context = encode_context(&ContextMap::from([("k", "v")])).unwrap();
    backend.submit(
        LogRecord::new(Level::Error, "{} failed")
            .with_arg("sync")
            .with_tag(context),
    );
    let calls = backend.calls.lock().unwrap();
    assert_eq!(calls[0].2, "k=v sync failed");
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn generated_context_is_per_thread() {
    thread_local! {
        static WORKER: std::cell::RefCell<String> = std::cell::RefCell::new("main".to_string());
    }
    let backend = Arc::new(Minimal::default());
    let logger = TaggedLogger::with_event_context(backend.clone(), || {
        ContextMap::from([("worker", WORKER.with(|w| w.borrow().clone()))])
    });

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let logger = logger.clone();
            std::thread::spawn(move || {
                WORKER.with(|w| *w.borrow_mut() = format!("w{}", i));
                logger.info("tick", ());
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut messages: Vec<String> = backend
        .calls
        .lock()
        .unwrap()
        .iter()
        .map(|(_, _, m)| m.clone())
        .collect();
    messages.sort();
    assert_eq!(
        messages,
        vec![
            "worker=w0 tick",
            "worker=w1 tick",
            "worker=w2 tick",
            "worker=w3 tick"
        ]
    );
}
