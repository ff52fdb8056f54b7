//SPDX-License-Identifier: MIT OR Apache-2.0

use crate::parser::build_kvs;
use proc_macro::{TokenStream, TokenTree};
use std::collections::VecDeque;

pub fn context_impl(input: TokenStream) -> TokenStream {
    let mut input: VecDeque<TokenTree> = input.into_iter().collect();
    let kvs = match build_kvs(&mut input) {
        Ok(kvs) => kvs,
        Err(e) => return e,
    };
    if kvs.is_empty() {
        return "::tagwise::ContextMap::new()".parse().unwrap();
    }
    let mut src = String::from("{\nlet mut __tagwise_context = ::tagwise::ContextMap::new();\n");
    for (key, value) in &kvs {
        src.push_str(&format!(
            "__tagwise_context.insert({:?}, ::std::string::ToString::to_string(&({})));\n",
            key, value
        ));
    }
    src.push_str("__tagwise_context\n}");
    src.parse().unwrap()
}
