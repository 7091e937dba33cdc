// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeSet;

use lazy_static::lazy_static;

use super::types::TypeTag;

lazy_static! {
    static ref STRING_PROPERTIES: BTreeSet<&'static str> = [
        "length",
        "at",
        "charAt",
        "charCodeAt",
        "codePointAt",
        "concat",
        "endsWith",
        "includes",
        "indexOf",
        "lastIndexOf",
        "localeCompare",
        "match",
        "matchAll",
        "normalize",
        "padEnd",
        "padStart",
        "repeat",
        "replace",
        "replaceAll",
        "search",
        "slice",
        "split",
        "startsWith",
        "substring",
        "toLocaleLowerCase",
        "toLocaleUpperCase",
        "toLowerCase",
        "toUpperCase",
        "trim",
        "trimEnd",
        "trimStart",
    ]
    .into_iter()
    .collect();
    static ref ARRAY_PROPERTIES: BTreeSet<&'static str> = [
        "length",
        "at",
        "concat",
        "copyWithin",
        "entries",
        "every",
        "fill",
        "filter",
        "find",
        "findIndex",
        "findLast",
        "findLastIndex",
        "flat",
        "flatMap",
        "forEach",
        "includes",
        "indexOf",
        "join",
        "keys",
        "lastIndexOf",
        "map",
        "pop",
        "push",
        "reduce",
        "reduceRight",
        "reverse",
        "shift",
        "slice",
        "some",
        "sort",
        "splice",
        "unshift",
        "values",
    ]
    .into_iter()
    .collect();
    static ref FUNCTION_PROPERTIES: BTreeSet<&'static str> =
        ["apply", "bind", "call", "arguments", "caller"]
            .into_iter()
            .collect();
}

/// Tags implied by accessing a builtin property called `name`.
pub(super) fn property_hints(name: &str) -> impl Iterator<Item = TypeTag> {
    [
        (STRING_PROPERTIES.contains(name), TypeTag::String),
        (ARRAY_PROPERTIES.contains(name), TypeTag::Array),
        (FUNCTION_PROPERTIES.contains(name), TypeTag::Function),
    ]
    .into_iter()
    .filter_map(|(hit, tag)| hit.then_some(tag))
}
