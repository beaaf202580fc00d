// ABOUTME: BemNodeList, an ordered element list tagged with a write-once block name.
// ABOUTME: Provides block-scoped bulk operations: modifiers, inner HTML, listeners and set_state.

use std::fmt;

use dom_query::NodeRef;

use crate::element::BemElement;
use crate::error::{BemError, Result};
use crate::events::{EventRegistry, Listener};

/// Elements addressed by [`BemNodeList::set_state`].
#[derive(Clone)]
pub enum StateTarget<'a> {
    Index(usize),
    Indices(Vec<usize>),
    Node(NodeRef<'a>),
    Nodes(Vec<NodeRef<'a>>),
}

impl From<usize> for StateTarget<'_> {
    fn from(index: usize) -> Self {
        StateTarget::Index(index)
    }
}

impl From<Vec<usize>> for StateTarget<'_> {
    fn from(indices: Vec<usize>) -> Self {
        StateTarget::Indices(indices)
    }
}

impl From<&[usize]> for StateTarget<'_> {
    fn from(indices: &[usize]) -> Self {
        StateTarget::Indices(indices.to_vec())
    }
}

impl<'a> From<NodeRef<'a>> for StateTarget<'a> {
    fn from(node: NodeRef<'a>) -> Self {
        StateTarget::Node(node)
    }
}

impl<'a> From<Vec<NodeRef<'a>>> for StateTarget<'a> {
    fn from(nodes: Vec<NodeRef<'a>>) -> Self {
        StateTarget::Nodes(nodes)
    }
}

/// Ordered list of elements belonging to one block.
#[derive(Clone, Default)]
pub struct BemNodeList<'a> {
    nodes: Vec<NodeRef<'a>>,
    block_name: Option<String>,
}

impl fmt::Debug for BemNodeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BemNodeList")
            .field("block_name", &self.block_name)
            .field("nodes", &self.nodes.iter().map(|n| n.id).collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> BemNodeList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<NodeRef<'a>>) -> Self {
        Self {
            nodes,
            block_name: None,
        }
    }

    /// Block name the list was tagged with.
    pub fn block_name(&self) -> Option<&str> {
        self.block_name.as_deref()
    }

    /// Tags the list with a block name. Only the first call has an effect.
    pub fn set_block_name(&mut self, name: impl Into<String>) {
        if self.block_name.is_none() {
            self.block_name = Some(name.into());
        }
    }

    pub fn push(&mut self, node: NodeRef<'a>) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[NodeRef<'a>] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> Option<BemElement<'a>> {
        self.nodes.get(index).cloned().map(BemElement::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = BemElement<'a>> + '_ {
        self.nodes.iter().cloned().map(BemElement::new)
    }

    /// Position of `node` in the list.
    pub fn index_of(&self, node: &NodeRef) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == node.id)
    }

    /// Replaces the children of every element with parsed `html`.
    pub fn set_inner_html_for_all(&self, html: &str) {
        for node in &self.nodes {
            node.set_html(html);
        }
    }

    pub fn add_event_listener_for_all(
        &self,
        registry: &mut EventRegistry,
        event_type: &str,
        listener: &Listener,
        capture: bool,
    ) {
        for node in &self.nodes {
            registry.add_listener(node, event_type, listener.clone(), capture);
        }
    }

    pub fn remove_event_listener_for_all(
        &self,
        registry: &mut EventRegistry,
        event_type: &str,
        listener: &Listener,
        capture: bool,
    ) {
        for node in &self.nodes {
            registry.remove_listener(node, event_type, listener, capture);
        }
    }

    /// Toggles `modifier` on every element, resolved against the list's block.
    pub fn toggle_modifier_for_all(&self, modifier: &str, force: Option<bool>) {
        for element in self.iter() {
            element.toggle_modifier(modifier, force, self.block_name());
        }
    }

    pub fn add_modifier_for_all(&self, modifier: &str) {
        self.toggle_modifier_for_all(modifier, Some(true));
    }

    pub fn remove_modifier_for_all(&self, modifier: &str) {
        self.toggle_modifier_for_all(modifier, Some(false));
    }

    /// Elements carrying `modifier`, as a new list with the same block name.
    pub fn with_modifier(&self, modifier: &str) -> BemNodeList<'a> {
        let nodes = self
            .iter()
            .filter(|e| e.has_modifier(modifier, self.block_name()))
            .map(BemElement::into_node)
            .collect();

        BemNodeList {
            nodes,
            block_name: self.block_name.clone(),
        }
    }

    /// Puts `modifier` on exactly the targeted elements and `inverse_modifier`
    /// on exactly the others.
    ///
    /// Element targets that are not in the list address nothing. Fails when
    /// both modifiers are `None`.
    pub fn set_state(
        &self,
        target: impl Into<StateTarget<'a>>,
        modifier: Option<&str>,
        inverse_modifier: Option<&str>,
    ) -> Result<()> {
        if modifier.is_none() && inverse_modifier.is_none() {
            return Err(BemError::invalid_argument(
                "at least one of 'modifier' and 'inverse_modifier' must be given",
            ));
        }

        let targeted: Vec<usize> = match target.into() {
            StateTarget::Index(index) => vec![index],
            StateTarget::Indices(indices) => indices,
            StateTarget::Node(node) => self.index_of(&node).into_iter().collect(),
            StateTarget::Nodes(nodes) => nodes.iter().filter_map(|n| self.index_of(n)).collect(),
        };

        for (index, element) in self.iter().enumerate() {
            let on = targeted.contains(&index);
            if let Some(modifier) = modifier {
                element.toggle_modifier(modifier, Some(on), self.block_name());
            }
            if let Some(inverse) = inverse_modifier {
                element.toggle_modifier(inverse, Some(!on), self.block_name());
            }
        }
        Ok(())
    }
}
