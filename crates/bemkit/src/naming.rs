// ABOUTME: Pure BEM name parsing over class token lists (block, element, modifiers).
// ABOUTME: Composes modifier class names and camel-cases element names for collection keys.

//! BEM naming rules.
//!
//! Every function here works on a plain slice of class tokens, so the rules can
//! be exercised without a DOM. A token follows `block(__element)?(--modifier)?`;
//! element and modifier segments are found by splitting on the literal `__` and
//! `--` separators.
//!
//! Key behaviors:
//! - Without a needle, the block name comes from the *first* class token.
//! - Unresolvable names yield `None`, never an error.
//! - Element and modifier names must not contain `__`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Collection key for elements that carry the block class but no element segment.
pub const BARE_BLOCK_KEY: &str = "$bareBlock";

/// Separator between block and element names.
pub const ELEMENT_SEPARATOR: &str = "__";

/// Separator before a modifier name.
pub const MODIFIER_SEPARATOR: &str = "--";

static HYPHEN_LOWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-([a-z])").unwrap());

/// Empty strings count as "not given", like an unset optional argument.
fn given(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty())
}

/// Segment of a token before the first `__`.
fn before_element(token: &str) -> &str {
    token.split(ELEMENT_SEPARATOR).next().unwrap_or(token)
}

/// Returns the block name of a class list.
///
/// With a `needle`, returns it when any token's pre-`__` segment equals it and
/// `None` otherwise. Without one, returns the pre-`--`, pre-`__` segment of the
/// first token. `None` when the list is empty.
pub fn block_name<S: AsRef<str>>(classes: &[S], needle: Option<&str>) -> Option<String> {
    let first = classes.first()?.as_ref();

    if let Some(needle) = given(needle) {
        return classes
            .iter()
            .any(|c| before_element(c.as_ref()) == needle)
            .then(|| needle.to_string());
    }

    let block = first.split(MODIFIER_SEPARATOR).next().unwrap_or(first);
    Some(before_element(block).to_string())
}

/// Returns the element name of a class list, or `None` for bare block nodes.
///
/// The token inspected is the first one whose block segment equals
/// `required_block`, falling back to the first token. The name is the text
/// after `{block}__` and before any `--`.
pub fn element_name<S: AsRef<str>>(classes: &[S], required_block: Option<&str>) -> Option<String> {
    let required_block = given(required_block);
    let first = classes.first()?.as_ref();

    let token = required_block
        .and_then(|required| {
            classes
                .iter()
                .map(AsRef::as_ref)
                .find(|c| before_element(c) == required)
        })
        .unwrap_or(first);

    let block = block_name(classes, required_block)?;
    let marker = format!("{block}{ELEMENT_SEPARATOR}");
    let rest = token.split(marker.as_str()).nth(1)?;
    let element = rest.split(MODIFIER_SEPARATOR).next().unwrap_or(rest);

    (!element.is_empty()).then(|| element.to_string())
}

/// Returns the modifiers applied for the resolved block/element, in class order.
///
/// `None` only when the list is empty; an empty vec when no token carries the
/// expected `{block}__{element}--` or `{block}--` prefix.
pub fn modifiers<S: AsRef<str>>(classes: &[S], required_block: Option<&str>) -> Option<Vec<String>> {
    let block = resolve_block(classes, required_block)?;
    let element = element_name(classes, Some(&block));
    let prefix = format!(
        "{}{MODIFIER_SEPARATOR}",
        compose_class(&block, element.as_deref(), None)
    );

    Some(
        classes
            .iter()
            .filter_map(|c| c.as_ref().strip_prefix(prefix.as_str()))
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Full class name that expresses `modifier` on an element with these classes.
///
/// `None` when no block name is forced and none can be resolved.
pub fn modifier_class<S: AsRef<str>>(
    classes: &[S],
    modifier: &str,
    required_block: Option<&str>,
) -> Option<String> {
    let block = match given(required_block) {
        Some(block) => block.to_string(),
        None => block_name(classes, None)?,
    };
    let element = element_name(classes, Some(&block));
    Some(compose_class(&block, element.as_deref(), Some(modifier)))
}

/// Builds `block`, `block__element`, `block--modifier` or `block__element--modifier`.
pub fn compose_class(block: &str, element: Option<&str>, modifier: Option<&str>) -> String {
    let mut class = block.to_string();
    if let Some(element) = element {
        class.push_str(ELEMENT_SEPARATOR);
        class.push_str(element);
    }
    if let Some(modifier) = modifier {
        class.push_str(MODIFIER_SEPARATOR);
        class.push_str(modifier);
    }
    class
}

/// Turns `main-title` into `mainTitle`. Only a hyphen followed by a lowercase
/// ASCII letter is folded.
pub fn camel_case(name: &str) -> String {
    HYPHEN_LOWER
        .replace_all(name, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

fn resolve_block<S: AsRef<str>>(classes: &[S], required_block: Option<&str>) -> Option<String> {
    classes.first()?;
    match given(required_block) {
        Some(block) => Some(block.to_string()),
        None => block_name(classes, None),
    }
}
