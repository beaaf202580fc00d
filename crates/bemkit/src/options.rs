// ABOUTME: Configuration for building BEM node collections: Traversal, NodesOptions and NodesBuilder.
// ABOUTME: NodesBuilder provides a fluent API that ends in BemNodes construction.

use std::fmt;

use dom_query::Document;

use crate::error::Result;
use crate::nodes::{BemNodes, Target};

/// Where traversal starts for each target element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// The target element itself.
    #[default]
    Element,
    /// The outermost ancestor of the target that carries the same block name.
    BlockRoot,
    /// The document body, classified against one block name.
    Global,
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Traversal::Element => "element",
            Traversal::BlockRoot => "block-root",
            Traversal::Global => "global",
        };
        write!(f, "{}", s)
    }
}

/// Options for building a node collection.
#[derive(Debug, Clone, Default)]
pub struct NodesOptions {
    /// Keys that must be present in the finished collection. An empty list
    /// means no requirement and always passes.
    pub must_include: Vec<String>,
    /// Block name that overrides the one resolved from the traversal root.
    pub block_name: Option<String>,
    pub traversal: Traversal,
}

/// Builder for constructing BemNodes with custom options.
#[derive(Debug, Clone, Default)]
pub struct NodesBuilder {
    opts: NodesOptions,
}

impl NodesBuilder {
    /// Create a new NodesBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require these keys to be present after construction.
    pub fn must_include<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opts.must_include = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Classify against this block name instead of the resolved one.
    pub fn block_name(mut self, name: impl Into<String>) -> Self {
        self.opts.block_name = Some(name.into());
        self
    }

    /// Set the traversal mode.
    pub fn traversal(mut self, traversal: Traversal) -> Self {
        self.opts.traversal = traversal;
        self
    }

    /// Shorthand for `traversal(Traversal::BlockRoot)`.
    pub fn find_root(self) -> Self {
        self.traversal(Traversal::BlockRoot)
    }

    /// Shorthand for `traversal(Traversal::Global)`.
    pub fn find_global(self) -> Self {
        self.traversal(Traversal::Global)
    }

    pub fn options(&self) -> &NodesOptions {
        &self.opts
    }

    /// Build the collection for `target` inside `doc`.
    pub fn build<'a>(self, doc: &'a Document, target: impl Into<Target<'a>>) -> Result<BemNodes<'a>> {
        BemNodes::new(doc, target.into(), &self.opts)
    }
}
