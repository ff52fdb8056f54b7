//SPDX-License-Identifier: MIT OR Apache-2.0

use crate::parser::{Template, build_kvs, compile_error, parse_expr, parse_template, take_labeled, unquote};
use proc_macro::{TokenStream, TokenTree};
use std::collections::VecDeque;

/**
Expands one of the level macros.

```ignore
// ignore because: this shows the shape of the generated code
info!(logger, tag: SLACK, "user {name} logged in", name = user.name);
// becomes
{
    let __tagwise_record = (logger).at(::tagwise::Level::Info);
    let __tagwise_record = __tagwise_record.tag(SLACK);
    let __tagwise_kv_0 = ::tagwise::Arg::new(::std::string::ToString::to_string(&(user.name)));
    __tagwise_record
        .key_value("name", __tagwise_kv_0.clone())
        .arg(__tagwise_kv_0.clone())
        .log("user {} logged in");
}
```
*/
pub fn log_impl(level: &str, input: TokenStream) -> TokenStream {
    let mut input: VecDeque<TokenTree> = input.into_iter().collect();

    let logger = parse_expr(&mut input);
    if logger.is_empty() {
        return compile_error("Expected a logger as the first argument");
    }
    let mut tags = Vec::new();
    let mut error = None;
    loop {
        if let Some(tag) = take_labeled(&mut input, "tag") {
            tags.push(tag);
        } else if let Some(e) = take_labeled(&mut input, "error") {
            if error.is_some() {
                return compile_error("error: given more than once");
            }
            error = Some(e);
        } else {
            break;
        }
    }

    let template_source = match input.pop_front() {
        Some(TokenTree::Literal(l)) => {
            let text = l.to_string();
            match unquote(&text) {
                Some(inner) => inner.to_string(),
                None => return compile_error("The message must be a string literal"),
            }
        }
        _ => return compile_error("The message must be a string literal"),
    };
    match input.front() {
        None => {}
        Some(TokenTree::Punct(p)) if p.as_char() == ',' => {
            input.pop_front();
        }
        Some(_) => return compile_error("Expected ','"),
    }
    let kvs = match build_kvs(&mut input) {
        Ok(kvs) => kvs,
        Err(e) => return e,
    };
    let Template { text, keys } = match parse_template(&template_source) {
        Ok(template) => template,
        Err(e) => return e,
    };

    let mut src = String::from("{\n");
    src.push_str(&format!(
        "let __tagwise_record = ({}).at(::tagwise::Level::{});\n",
        logger, level
    ));
    for tag in &tags {
        src.push_str(&format!(
            "let __tagwise_record = __tagwise_record.tag({});\n",
            tag
        ));
    }
    if let Some(error) = &error {
        src.push_str(&format!(
            "let __tagwise_record = __tagwise_record.error({});\n",
            error
        ));
    }
    for (i, (_, value)) in kvs.iter().enumerate() {
        src.push_str(&format!(
            "let __tagwise_kv_{} = ::tagwise::Arg::new(::std::string::ToString::to_string(&({})));\n",
            i, value
        ));
    }
    src.push_str("__tagwise_record\n");
    for (i, (key, _)) in kvs.iter().enumerate() {
        src.push_str(&format!(
            ".key_value({:?}, __tagwise_kv_{}.clone())\n",
            key, i
        ));
    }
    for key in &keys {
        let Some(i) = kvs.iter().position(|(k, _)| k == key) else {
            return compile_error(&format!("Key {} not found", key));
        };
        src.push_str(&format!(".arg(__tagwise_kv_{}.clone())\n", i));
    }
    src.push_str(&format!(".log(\"{}\");\n}}", text));
    src.parse().unwrap()
}
