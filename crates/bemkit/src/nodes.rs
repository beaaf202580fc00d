// ABOUTME: BemNodes, an ordered mapping from BEM element name to BemNodeList.
// ABOUTME: Walks a subtree, block root or document body and buckets elements of one block.

//! Node collections.
//!
//! Building a collection visits the traversal root and every element below it
//! in pre-order. An element is kept when it carries the governing block name:
//! elements with an element segment go under the camel-cased element name,
//! bare block nodes under [`BARE_BLOCK_KEY`]. Elements of other blocks are
//! skipped but their descendants are still visited.
//!
//! Keys live in a dedicated mapping, so element names such as `iter` or `len`
//! cannot shadow collection methods.

use dom_query::{Document, NodeRef, Selection};
use serde::Serialize;
use tracing::{debug, trace};

use crate::class_bag::read_classes;
use crate::element::BemElement;
use crate::error::{BemError, Result};
use crate::naming::{self, BARE_BLOCK_KEY};
use crate::node_list::BemNodeList;
use crate::options::{NodesBuilder, NodesOptions, Traversal};
use crate::selector::get_or_compile;

/// Where a collection starts from.
#[derive(Clone, Default)]
pub enum Target<'a> {
    /// No starting element; only meaningful for global traversal with a block name.
    #[default]
    None,
    /// CSS selector resolved against the document.
    Selector(String),
    Element(NodeRef<'a>),
    Elements(Vec<NodeRef<'a>>),
}

impl From<&str> for Target<'_> {
    fn from(css: &str) -> Self {
        Target::Selector(css.to_string())
    }
}

impl From<String> for Target<'_> {
    fn from(css: String) -> Self {
        Target::Selector(css)
    }
}

impl<'a> From<NodeRef<'a>> for Target<'a> {
    fn from(node: NodeRef<'a>) -> Self {
        Target::Element(node)
    }
}

impl<'a> From<BemElement<'a>> for Target<'a> {
    fn from(element: BemElement<'a>) -> Self {
        Target::Element(element.into_node())
    }
}

impl<'a> From<Vec<NodeRef<'a>>> for Target<'a> {
    fn from(nodes: Vec<NodeRef<'a>>) -> Self {
        Target::Elements(nodes)
    }
}

impl<'a> From<&Selection<'a>> for Target<'a> {
    fn from(selection: &Selection<'a>) -> Self {
        Target::Elements(selection.nodes().to_vec())
    }
}

/// Per-key counts, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeySummary {
    pub key: String,
    pub block: Option<String>,
    pub count: usize,
}

/// Serializable overview of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodesSummary {
    pub keys: Vec<KeySummary>,
    pub total: usize,
}

/// Ordered mapping from element-name key to the elements under that key.
#[derive(Debug, Default)]
pub struct BemNodes<'a> {
    entries: Vec<(String, BemNodeList<'a>)>,
}

impl<'a> BemNodes<'a> {
    pub fn builder() -> NodesBuilder {
        NodesBuilder::new()
    }

    /// Builds a collection for `target` inside `doc`.
    ///
    /// Fails on an invalid selector, on global traversal without any block
    /// identity, and when a `must_include` key is missing.
    pub fn new(doc: &'a Document, target: Target<'a>, opts: &NodesOptions) -> Result<Self> {
        let elements = match target {
            Target::None => Vec::new(),
            Target::Selector(css) => {
                let matcher = get_or_compile(&css).ok_or(BemError::InvalidSelector(css))?;
                doc.select_matcher(&matcher).nodes().to_vec()
            }
            Target::Element(node) => vec![node],
            Target::Elements(nodes) => nodes,
        };

        if opts.traversal == Traversal::Global {
            let body = body_of(&doc.root());
            return Self::global(Some(body), &elements, opts);
        }
        Self::from_elements(elements, opts)
    }

    /// Builds a collection from already resolved starting elements.
    ///
    /// Global traversal finds the body through the first element's document.
    pub fn from_elements(elements: Vec<NodeRef<'a>>, opts: &NodesOptions) -> Result<Self> {
        if opts.traversal == Traversal::Global {
            let body = elements.first().map(body_of);
            return Self::global(body, &elements, opts);
        }

        let mut nodes = BemNodes::default();
        for node in elements {
            let element = BemElement::new(node);
            let start = match opts.traversal {
                Traversal::BlockRoot => element.block_root(opts.block_name.as_deref()),
                _ => element,
            };

            let block = match given(&opts.block_name) {
                Some(block) => block.to_string(),
                None => match start.block_name(None) {
                    Some(block) => block,
                    None => {
                        debug!("start element has no block name, skipped");
                        continue;
                    }
                },
            };

            nodes.collect(start.node(), &block);
        }

        nodes.check_required(&opts.must_include)?;
        Ok(nodes)
    }

    fn global(body: Option<NodeRef<'a>>, elements: &[NodeRef<'a>], opts: &NodesOptions) -> Result<Self> {
        let block = match given(&opts.block_name) {
            Some(block) => block.to_string(),
            None => elements
                .first()
                .and_then(|n| BemElement::new(n.clone()).block_name(None))
                .ok_or(BemError::GlobalWithoutIdentity)?,
        };

        let mut nodes = BemNodes::default();
        if let Some(body) = body {
            nodes.collect(&body, &block);
        }
        nodes.check_required(&opts.must_include)?;
        Ok(nodes)
    }

    /// Pre-order walk of `root` and its element descendants.
    fn collect(&mut self, root: &NodeRef<'a>, block: &str) {
        let mut stack = vec![root.clone()];
        while let Some(node) = stack.pop() {
            let classes = read_classes(&node);
            if naming::block_name(&classes, Some(block)).is_some() {
                let key = match naming::element_name(&classes, Some(block)) {
                    Some(element) => naming::camel_case(&element),
                    None => BARE_BLOCK_KEY.to_string(),
                };
                trace!(key = %key, "bucketed");
                self.add(key, node.clone(), block);
            }

            let mut children = node.element_children();
            children.reverse();
            stack.extend(children);
        }
    }

    /// A node already under `key` is not added again, so overlapping
    /// traversal roots bucket each element once.
    fn add(&mut self, key: String, node: NodeRef<'a>, block: &str) {
        if let Some((_, list)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            if list.index_of(&node).is_none() {
                list.push(node);
            }
            return;
        }

        let mut list = BemNodeList::from_nodes(vec![node]);
        list.set_block_name(block);
        self.entries.push((key, list));
    }

    fn check_required(&self, must_include: &[String]) -> Result<()> {
        let missing: Vec<String> = must_include
            .iter()
            .filter(|k| !self.contains_key(k))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(BemError::MissingKeys(missing))
        }
    }

    pub fn get(&self, key: &str) -> Option<&BemNodeList<'a>> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, l)| l)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut BemNodeList<'a>> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, l)| l)
    }

    /// Bare block nodes (`$bareBlock`).
    pub fn bare_block(&self) -> Option<&BemNodeList<'a>> {
        self.get(BARE_BLOCK_KEY)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or replaces the list under `key`, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, list: BemNodeList<'a>) -> Option<BemNodeList<'a>> {
        let key = key.into();
        match self.get_mut(&key) {
            Some(existing) => Some(std::mem::replace(existing, list)),
            None => {
                self.entries.push((key, list));
                None
            }
        }
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BemNodeList<'a>)> {
        self.entries.iter().map(|(k, l)| (k.as_str(), l))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> NodesSummary {
        let keys: Vec<KeySummary> = self
            .iter()
            .map(|(key, list)| KeySummary {
                key: key.to_string(),
                block: list.block_name().map(str::to_string),
                count: list.len(),
            })
            .collect();
        let total = keys.iter().map(|k| k.count).sum();
        NodesSummary { keys, total }
    }
}

fn given(name: &Option<String>) -> Option<&str> {
    name.as_deref().filter(|n| !n.is_empty())
}

/// The `<body>` of the document `node` belongs to, or the document node itself.
fn body_of<'a>(node: &NodeRef<'a>) -> NodeRef<'a> {
    let mut top = node.clone();
    while let Some(parent) = top.parent() {
        top = parent;
    }

    let body = Selection::from(top.clone())
        .select("body")
        .nodes()
        .first()
        .cloned();
    body.unwrap_or(top)
}
