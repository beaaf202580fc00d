// ABOUTME: Compiled CSS selector cache and class-selector escaping.
// ABOUTME: Used by the finder and by selector-string targets of node collections.

//! Selector helpers.
//!
//! Selector parsing costs more than matching on small subtrees, so compiled
//! matchers are cached process-wide. Invalid selectors are cached too (as
//! `None`) so a bad input is only parsed once.

use std::collections::HashMap;
use std::sync::RwLock;

use dom_query::{Matcher, NodeRef, Selection};
use once_cell::sync::Lazy;

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Matcher>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` for selectors that do not parse.
pub fn get_or_compile(css: &str) -> Option<Matcher> {
    {
        let cache = SELECTOR_CACHE.read().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Matcher::new(css).ok();
    let mut cache = SELECTOR_CACHE.write().unwrap_or_else(|e| e.into_inner());
    cache
        .entry(css.to_string())
        .or_insert(compiled)
        .clone()
}

/// Escapes a class name for use in a `.class` selector.
///
/// ASCII alphanumerics, `-`, `_` and non-ASCII characters pass through; a
/// leading digit (or a digit after a leading hyphen) is written as a hex escape.
pub fn escape_ident(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for (i, ch) in ident.chars().enumerate() {
        let leading = i == 0 || (i == 1 && ident.starts_with('-'));
        if ch.is_ascii_digit() && leading {
            out.push_str(&format!("\\{:x} ", ch as u32));
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii() {
            out.push(ch);
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}

/// `.class` selector for a raw class name.
pub fn class_selector(class: &str) -> String {
    format!(".{}", escape_ident(class))
}

/// Descendants of `root` (excluding `root`) carrying `class`, in document order.
pub fn descendants_with_class<'a>(root: &NodeRef<'a>, class: &str) -> Vec<NodeRef<'a>> {
    let Some(matcher) = get_or_compile(&class_selector(class)) else {
        return Vec::new();
    };

    Selection::from(root.clone())
        .select_matcher(&matcher)
        .nodes()
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    #[test]
    fn test_valid_selector_is_cached() {
        assert!(get_or_compile("div.block__item").is_some());
        assert!(get_or_compile("div.block__item").is_some());
    }

    #[test]
    fn test_invalid_selector_returns_none() {
        assert!(get_or_compile("[[[invalid").is_none());
        assert!(get_or_compile("[[[invalid").is_none());
    }

    #[test]
    fn test_escape_ident() {
        assert_eq!(escape_ident("block__el--mod"), "block__el--mod");
        assert_eq!(escape_ident("is:active"), "is\\:active");
        assert_eq!(escape_ident("w-1/2"), "w-1\\/2");
        assert_eq!(escape_ident("2col"), "\\32 col");
    }

    #[test]
    fn test_escaped_selectors_compile() {
        for class in ["is:active", "w-1/2", "2col", "block__el--mod"] {
            assert!(get_or_compile(&class_selector(class)).is_some(), "{class}");
        }
    }

    #[test]
    fn test_descendants_with_class_excludes_root() {
        let doc = Document::from(
            r#"<div id="root" class="x"><span class="x"></span><p><b class="x"></b></p></div>"#,
        );
        let root = doc.select("#root").nodes().first().cloned().unwrap();
        let found = descendants_with_class(&root, "x");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|n| n.id != root.id));
    }
}
