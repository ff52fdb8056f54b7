//SPDX-License-Identifier: MIT OR Apache-2.0

//! Hand-rolled parsing of macro arguments.
//!
//! Everything here works on a `VecDeque<TokenTree>` that is consumed from the front.  Errors are
//! returned as ready-made `compile_error!` token streams.

use proc_macro::{Spacing, TokenStream, TokenTree};
use std::collections::VecDeque;

/// A `compile_error!` invocation with `message`.
pub fn compile_error(message: &str) -> TokenStream {
    format!("compile_error!({:?});", message).parse().unwrap()
}

fn is_comma(token: &TokenTree) -> bool {
    matches!(token, TokenTree::Punct(p) if p.as_char() == ',')
}

/**
Takes an expression off the front of `input`, up to the next top-level `,` (which is consumed)
or the end of the stream.

Groups are single token trees, so commas inside parentheses, brackets and braces don't count.
The expression is returned as source text.
*/
pub fn parse_expr(input: &mut VecDeque<TokenTree>) -> String {
    let mut expr = TokenStream::new();
    while let Some(token) = input.pop_front() {
        if is_comma(&token) {
            break;
        }
        expr.extend([token]);
    }
    expr.to_string()
}

/**
Takes a key off the front of `input`, up to and including the `=`.

Returns `None` when the stream is exhausted first.
*/
fn parse_key(input: &mut VecDeque<TokenTree>) -> Result<Option<String>, TokenStream> {
    let mut key = String::new();
    loop {
        match input.pop_front() {
            Some(TokenTree::Punct(p)) if p.as_char() == '=' => {
                if key.is_empty() {
                    return Err(compile_error("Expected a key before '='"));
                }
                return Ok(Some(key));
            }
            Some(TokenTree::Punct(p)) => {
                return Err(compile_error(&format!("Unexpected '{}' in key", p.as_char())));
            }
            Some(TokenTree::Ident(i)) => key.push_str(&i.to_string()),
            Some(TokenTree::Literal(l)) => {
                let text = l.to_string();
                match unquote(&text) {
                    Some(inner) => key.push_str(inner),
                    None => key.push_str(&text),
                }
            }
            Some(TokenTree::Group(_)) => {
                return Err(compile_error("Keys must be identifiers or string literals"));
            }
            None if key.is_empty() => return Ok(None),
            None => return Err(compile_error(&format!("Expected '=' after {}", key))),
        }
    }
}

/// The contents of a plain (non-raw) string literal, still escaped.
pub fn unquote(literal: &str) -> Option<&str> {
    if literal.len() >= 2 && literal.starts_with('"') && literal.ends_with('"') {
        Some(&literal[1..literal.len() - 1])
    } else {
        None
    }
}

/**
Parses `key = value, key = value, ...` until the end of `input`.

Pairs are returned in the order written.  A trailing comma is fine, a repeated key is not.
*/
pub fn build_kvs(input: &mut VecDeque<TokenTree>) -> Result<Vec<(String, String)>, TokenStream> {
    let mut kvs: Vec<(String, String)> = Vec::new();
    while let Some(key) = parse_key(input)? {
        if kvs.iter().any(|(k, _)| *k == key) {
            return Err(compile_error(&format!("Key {} given more than once", key)));
        }
        let value = parse_expr(input);
        if value.is_empty() {
            return Err(compile_error(&format!("Expected a value for {}", key)));
        }
        kvs.push((key, value));
    }
    Ok(kvs)
}

/**
If `input` starts with `label:`, takes the label and the expression after it.

A `::` path separator does not count as the colon.
*/
pub fn take_labeled(input: &mut VecDeque<TokenTree>, label: &str) -> Option<String> {
    let labeled = match (input.front(), input.get(1)) {
        (Some(TokenTree::Ident(i)), Some(TokenTree::Punct(p))) => {
            i.to_string() == label && p.as_char() == ':' && p.spacing() == Spacing::Alone
        }
        _ => false,
    };
    if !labeled {
        return None;
    }
    input.pop_front();
    input.pop_front();
    Some(parse_expr(input))
}

/// A template whose `{key}` placeholders were turned into positional `{}`.
#[derive(Debug, PartialEq)]
pub struct Template {
    /// Source text of the rewritten template, without quotes.
    pub text: String,
    /// The key of every placeholder, in order of appearance.
    pub keys: Vec<String>,
}

/**
Rewrites the source text of a template literal.

`{{` and `}}` stand for literal braces.  A literal `{}` that results from escaping is written as
`\\{}` so it survives positional formatting.
*/
pub fn parse_template(source: &str) -> Result<Template, TokenStream> {
    let chars: Vec<char> = source.chars().collect();
    let mut text = String::new();
    let mut keys = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                // escapes are copied through untouched, including \u{...}
                let end = if chars.get(i + 1) == Some(&'u') && chars.get(i + 2) == Some(&'{') {
                    chars[i..].iter().position(|c| *c == '}').map_or(chars.len(), |p| i + p + 1)
                } else {
                    (i + 2).min(chars.len())
                };
                text.extend(&chars[i..end]);
                i = end;
            }
            '{' if chars.get(i + 1) == Some(&'{') => {
                if chars.get(i + 2) == Some(&'}') && chars.get(i + 3) == Some(&'}') {
                    text.push_str("\\\\{}");
                    i += 4;
                } else {
                    text.push('{');
                    i += 2;
                }
            }
            '{' => {
                let Some(close) = chars[i + 1..].iter().position(|c| *c == '}') else {
                    return Err(compile_error("Expected '}'"));
                };
                let key: String = chars[i + 1..i + 1 + close].iter().collect();
                let key = key.trim().to_string();
                if key.is_empty() {
                    return Err(compile_error(
                        "Placeholders must name a key, as in {name}",
                    ));
                }
                text.push_str("{}");
                keys.push(key);
                i += close + 2;
            }
            '}' if chars.get(i + 1) == Some(&'}') => {
                text.push('}');
                i += 2;
            }
            '}' => return Err(compile_error("Unmatched '}', write '}}' for a literal brace")),
            c => {
                text.push(c);
                i += 1;
            }
        }
    }
    Ok(Template { text, keys })
}
