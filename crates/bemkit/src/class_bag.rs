// ABOUTME: Token view over an element's class attribute with add/remove/toggle.
// ABOUTME: Every mutation re-reads the attribute so interleaved external writes are respected.

use dom_query::NodeRef;

const CLASS_ATTR: &str = "class";

/// Splits a class attribute on single spaces, skipping the empty tokens left
/// by repeated spaces.
pub fn tokenize(class_attr: &str) -> Vec<String> {
    class_attr
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ordered class tokens of one element.
///
/// The tokens are a snapshot taken at construction; the mutating methods never
/// trust it and always observe the attribute at call time.
pub struct ClassBag<'a> {
    node: NodeRef<'a>,
    tokens: Vec<String>,
}

impl<'a> ClassBag<'a> {
    /// Reads the current class attribute of `node`.
    pub fn new(node: &NodeRef<'a>) -> Self {
        let tokens = read_classes(node);
        Self {
            node: node.clone(),
            tokens,
        }
    }

    /// Tokens captured when the bag was built.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Whether the element currently carries `name`.
    pub fn contains(&self, name: &str) -> bool {
        read_classes(&self.node).iter().any(|c| c == name)
    }

    /// Appends `name` unless the element already has it.
    pub fn add(&self, name: &str) {
        let current = self.current_attr();
        if tokenize(&current).iter().any(|c| c == name) {
            return;
        }

        let updated = if current.is_empty() {
            name.to_string()
        } else {
            format!("{} {}", current, name)
        };
        self.node.set_attr(CLASS_ATTR, &updated);
    }

    /// Removes the first occurrence of `name`; no-op when absent.
    pub fn remove(&self, name: &str) {
        let mut classes = tokenize(&self.current_attr());
        let Some(index) = classes.iter().position(|c| c == name) else {
            return;
        };

        classes.remove(index);
        self.node.set_attr(CLASS_ATTR, &classes.join(" "));
    }

    /// Adds (`Some(true)`), removes (`Some(false)`) or flips (`None`) `name`.
    /// Returns whether the element has the class afterwards.
    pub fn toggle(&self, name: &str, force: Option<bool>) -> bool {
        let present = force.unwrap_or_else(|| !self.contains(name));
        if present {
            self.add(name);
        } else {
            self.remove(name);
        }
        present
    }

    fn current_attr(&self) -> String {
        self.node
            .attr(CLASS_ATTR)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }
}

/// Fresh class tokens of `node`.
pub fn read_classes(node: &NodeRef) -> Vec<String> {
    node.attr(CLASS_ATTR)
        .map(|v| tokenize(&v))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    fn first<'a>(doc: &'a Document, css: &str) -> NodeRef<'a> {
        doc.select(css).nodes().first().cloned().unwrap()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("a b  c"), vec!["a", "b", "c"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_empty_attribute_yields_empty_bag() {
        let doc = Document::from(r#"<div id="t" class=""></div><p id="u"></p>"#);
        assert!(ClassBag::new(&first(&doc, "#t")).is_empty());
        assert!(ClassBag::new(&first(&doc, "#u")).is_empty());
    }

    #[test]
    fn test_add_appends_once() {
        let doc = Document::from(r#"<div id="t" class="a b"></div>"#);
        let node = first(&doc, "#t");
        let bag = ClassBag::new(&node);

        bag.add("c");
        bag.add("c");
        assert_eq!(node.attr("class").unwrap().to_string(), "a b c");
    }

    #[test]
    fn test_add_to_unclassed_element() {
        let doc = Document::from(r#"<div id="t"></div>"#);
        let node = first(&doc, "#t");
        ClassBag::new(&node).add("a");
        assert_eq!(node.attr("class").unwrap().to_string(), "a");
    }

    #[test]
    fn test_remove_first_occurrence() {
        let doc = Document::from(r#"<div id="t" class="a b a"></div>"#);
        let node = first(&doc, "#t");
        let bag = ClassBag::new(&node);

        bag.remove("a");
        assert_eq!(node.attr("class").unwrap().to_string(), "b a");
        bag.remove("missing");
        assert_eq!(node.attr("class").unwrap().to_string(), "b a");
    }

    #[test]
    fn test_toggle_with_and_without_force() {
        let doc = Document::from(r#"<div id="t" class="a"></div>"#);
        let node = first(&doc, "#t");
        let bag = ClassBag::new(&node);

        assert!(bag.toggle("b", None));
        assert!(bag.contains("b"));
        assert!(!bag.toggle("b", None));
        assert!(!bag.contains("b"));
        assert!(bag.toggle("a", Some(true)));
        assert_eq!(node.attr("class").unwrap().to_string(), "a");
        assert!(!bag.toggle("a", Some(false)));
        assert_eq!(node.attr("class").unwrap().to_string(), "");
    }

    #[test]
    fn test_mutations_observe_external_writes() {
        let doc = Document::from(r#"<div id="t" class="a"></div>"#);
        let node = first(&doc, "#t");
        let bag = ClassBag::new(&node);

        node.set_attr("class", "x y");
        bag.add("z");
        assert_eq!(node.attr("class").unwrap().to_string(), "x y z");
        // Snapshot is untouched
        assert_eq!(bag.tokens(), &["a".to_string()]);
    }
}
