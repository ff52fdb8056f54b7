// SPDX-License-Identifier: MIT OR Apache-2.0
use std::cell::Cell;
use std::sync::Arc;
use tagwise::tag::decode_context;
use tagwise::{Capabilities, InMemoryLogger, Level, TaggedLogger, IMPORTANT, SLACK};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;

fn capturing() -> (Arc<InMemoryLogger>, TaggedLogger) {
    let memory = Arc::new(InMemoryLogger::new().with_capabilities(Capabilities::ALL));
    let logger = TaggedLogger::with_context(memory.clone(), &tagwise::context!(app = "demo"));
    (memory, logger)
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn placeholders_become_args_and_key_values() {
    let (memory, logger) = capturing();
    let user = String::from("alice");

    tagwise::info!(logger, "user {user} has {count} items", user = user, count = 2 + 1);

    let record = &memory.records()[0];
    assert_eq!(record.level(), Level::Info);
    assert_eq!(record.message(), "user {} has {} items");
    assert_eq!(record.formatted_message(), "user alice has 3 items");
    let kvs: Vec<String> = record.key_values().iter().map(|kv| kv.to_string()).collect();
    assert_eq!(kvs, vec!["user=alice", "count=3"]);
    assert_eq!(
        decode_context(record.combined_tag().as_ref()).get("app"),
        Some(Some("demo"))
    );
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn values_are_evaluated_once() {
    let (memory, logger) = capturing();
    let evaluations = Cell::new(0);
    let next = || {
        evaluations.set(evaluations.get() + 1);
        evaluations.get()
    };

    tagwise::debug!(logger, "{n} then {n} again", n = next());

    assert_eq!(evaluations.get(), 1);
    assert_eq!(memory.records()[0].formatted_message(), "1 then 1 again");
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn tags_and_errors() {
    let (memory, logger) = capturing();
    let failure = "nope".parse::<i32>().unwrap_err();

    tagwise::error!(logger, tag: SLACK, tag: IMPORTANT, error: failure, "parse of {what} failed", what = "port",);

    let record = &memory.records()[0];
    assert_eq!(record.level(), Level::Error);
    assert_eq!(record.tags()[..2], [SLACK, IMPORTANT]);
    assert_eq!(record.tags().len(), 3);
    assert_eq!(
        record.error().map(|e| e.to_string()).as_deref(),
        Some("invalid digit found in string")
    );
    assert_eq!(record.formatted_message(), "parse of port failed");
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn braces_and_unused_keys() {
    let (memory, logger) = capturing();

    tagwise::warn!(logger, "{{}} stays, {{x}} stays", extra = 5);
    tagwise::trace!(logger, "plain");

    let records = memory.records();
    assert_eq!(records[0].formatted_message(), "{} stays, {x} stays");
    assert_eq!(records[0].key_values()[0].to_string(), "extra=5");
    assert_eq!(records[1].level(), Level::Trace);
    assert_eq!(records[1].formatted_message(), "plain");
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn context_macro() {
    let id = 7;
    let map = tagwise::context!(id = id, "http.method" = "GET", nested = format!("{}-{}", "a", "b"));
    assert_eq!(map.to_string(), "http.method=GET id=7 nested=a-b");
}
