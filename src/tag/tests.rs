// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tests for the tag tree engine.

use super::names::{CONTEXT, CONTEXT_KEY_PREFIX, CONTEXT_VALUE_PREFIX, WRAPPER};
use super::*;
use crate::error::TagError;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;

fn context(pairs: &[(&str, &str)]) -> ContextMap {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn encode_then_decode_returns_the_map() {
    let mut map = context(&[("request", "42"), ("user", "alice"), ("path", "/a/b c")]);
    map.insert_absent("session");
    let tag = encode_context(&map).expect("non-empty map encodes");

    assert_eq!(tag.name(), CONTEXT);
    assert_eq!(tag.children().len(), 4);
    for key in tag.children() {
        assert!(key.name().starts_with(CONTEXT_KEY_PREFIX));
        assert_eq!(key.children().len(), 1);
        assert!(key.children()[0].name().starts_with(CONTEXT_VALUE_PREFIX));
        assert!(key.children()[0].is_leaf());
    }
    assert_eq!(decode_context(Some(&tag)), map);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn absence_is_idempotent() {
    assert_eq!(encode_context(&ContextMap::new()), None);
    assert!(decode_context(None).is_empty());
    assert!(decode_context(Some(&SLACK)).is_empty());

    let mut slot = None;
    assert!(take_context(&mut slot).is_empty());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn empty_value_decodes_as_absent() {
    let mut map = ContextMap::new();
    map.insert("blank", "");
    let decoded = decode_context(encode_context(&map).as_ref());
    assert_eq!(decoded.get("blank"), Some(None));
    assert_eq!(decoded.get("missing"), None);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn decode_finds_nested_context() {
    let ctx = encode_context(&context(&[("k", "v")]));
    let nested = combine([
        Some(IMPORTANT),
        Some(Tag::composite("OUTER", vec![NO_SLACK, ctx.clone().unwrap()])),
    ]);
    assert_eq!(decode_context(nested.as_ref()), context(&[("k", "v")]));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn malformed_entries_are_skipped() {
    let tag = Tag::composite(
        CONTEXT,
        vec![
            // no value child
            Tag::leaf("CONTEXT_KEY_lonely"),
            // two value children
            Tag::composite(
                "CONTEXT_KEY_twice",
                vec![Tag::leaf("CONTEXT_VAL_a"), Tag::leaf("CONTEXT_VAL_b")],
            ),
            // wrong value prefix
            Tag::composite("CONTEXT_KEY_odd", vec![Tag::leaf("SOMETHING_a")]),
            // wrong key prefix
            Tag::composite("KEY_x", vec![Tag::leaf("CONTEXT_VAL_x")]),
            Tag::composite("CONTEXT_KEY_good", vec![Tag::leaf("CONTEXT_VAL_yes")]),
        ],
    );
    assert_eq!(decode_context(Some(&tag)), context(&[("good", "yes")]));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn merge_prefers_the_call_side() {
    let base = encode_context(&context(&[("x", "1")]));
    let call = encode_context(&context(&[("x", "2"), ("y", "3")]));
    let merged = combine_context(base, call);
    assert_eq!(
        decode_context(merged.as_ref()),
        context(&[("x", "2"), ("y", "3")])
    );
    assert_eq!(merged.unwrap().name(), CONTEXT);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn merge_with_nothing_is_identity() {
    let wrapped = combine([Some(SLACK), encode_context(&context(&[("k", "v")]))]);
    assert_eq!(combine_context(None, wrapped.clone()), wrapped);
    assert_eq!(combine_context(wrapped.clone(), None), wrapped);
    assert_eq!(combine_context(None, None), None);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn merge_keeps_markers_from_both_sides() {
    let base = slack_tag(&context(&[("service", "billing"), ("x", "1")]));
    let call = combine([Some(IMPORTANT), encode_context(&context(&[("x", "2")]))]);

    let merged = combine_context(base, call).expect("merged tag");
    assert_eq!(merged.name(), WRAPPER);
    let names: Vec<&str> = merged.children().iter().map(Tag::name).collect();
    assert_eq!(names, vec!["SLACK", "IMPORTANT", CONTEXT]);
    assert_eq!(
        decode_context(Some(&merged)),
        context(&[("service", "billing"), ("x", "2")])
    );
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn merge_of_plain_markers_wraps_both() {
    let merged = combine_context(Some(SLACK), Some(IMPORTANT)).unwrap();
    assert_eq!(merged, Tag::composite(WRAPPER, vec![SLACK, IMPORTANT]));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn combine_collapses() {
    assert_eq!(combine([None, Some(SLACK)]), Some(SLACK));
    assert_eq!(combine([None, None]), None);
    assert_eq!(combine(std::iter::empty()), None);

    let first = Tag::leaf("FIRST");
    let second = Tag::leaf("SECOND");
    let both = combine([Some(first.clone()), Some(second.clone())]).unwrap();
    assert_ne!(both, first);
    assert_ne!(both, second);
    assert_eq!(both.name(), WRAPPER);
    assert_eq!(both.children(), &[first, second]);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn consuming_decode_only_sees_context_once() {
    let mut slot = combine([Some(SLACK), encode_context(&context(&[("k", "v")]))]);
    assert_eq!(take_context(&mut slot), context(&[("k", "v")]));
    assert!(take_context(&mut slot).is_empty());
    // the marker survives
    assert!(slot.as_ref().unwrap().contains("SLACK"));

    let mut root = encode_context(&context(&[("k", "v")]));
    assert_eq!(take_context(&mut root), context(&[("k", "v")]));
    assert!(take_context(&mut root).is_empty());
    assert_eq!(root, None);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn find_matches_by_name() {
    let tree = Tag::composite(
        "ROOT",
        vec![
            Tag::composite("A", vec![Tag::leaf("TARGET")]),
            Tag::leaf("TARGET"),
        ],
    );
    // independently built leaves are interchangeable
    assert_eq!(find_tag(Some(&tree), "TARGET"), Some(&Tag::leaf("TARGET")));
    assert_eq!(find_tag(Some(&tree), "ROOT"), Some(&tree));
    assert_eq!(find_tag(Some(&tree), "MISSING"), None);
    assert_eq!(find_tag(None, "ROOT"), None);

    let mut slot = Some(tree);
    assert_eq!(take_tag(&mut slot, "TARGET"), Some(Tag::leaf("TARGET")));
    // depth first: the nested one went first
    assert!(slot.as_ref().unwrap().children()[0].is_leaf());
    assert_eq!(slot.as_ref().unwrap().children()[1], Tag::leaf("TARGET"));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn checked_encoding_rejects_collisions() {
    assert_eq!(
        try_encode_context(&context(&[("", "v")])),
        Err(TagError::EmptyKey)
    );
    assert_eq!(
        try_encode_context(&context(&[("CONTEXT_VAL_x", "v")])),
        Err(TagError::ReservedKey("CONTEXT_VAL_x".to_string()))
    );
    assert!(matches!(
        try_encode_context(&context(&[("k", "a CONTEXT_KEY_b")])),
        Err(TagError::ReservedValue { .. })
    ));
    assert_eq!(
        try_encode_context(&context(&[("k", "v")])),
        Ok(encode_context(&context(&[("k", "v")])))
    );
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn display_folds_context_into_pairs() {
    let mut map = context(&[("k", "v"), ("a", "b")]);
    map.insert_absent("none");
    let tag = slack_tag(&map).unwrap();
    assert_eq!(tag.to_string(), "SLACK a=b k=v none=");
    assert_eq!(
        Tag::composite("GROUP", vec![SLACK, IMPORTANT]).to_string(),
        "GROUP [ SLACK, IMPORTANT ]"
    );
    assert_eq!(Tag::try_leaf(""), Err(TagError::EmptyName));
}
