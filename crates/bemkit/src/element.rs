// ABOUTME: BemElement wraps a DOM node and exposes BEM name resolution and modifier mutation.
// ABOUTME: Also finds the block root, builds node collections and finds elements by BEM name.

//! BEM capabilities of a single element.
//!
//! `BemElement` is a thin wrapper around a `dom_query::NodeRef`. Resolution
//! methods read the class attribute fresh on every call and delegate to the
//! pure rules in [`crate::naming`]; mutations go through [`ClassBag`].
//!
//! Optional `required_block` arguments force the block name used for
//! resolution. An empty string counts as not given.

use dom_query::NodeRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::class_bag::{read_classes, ClassBag};
use crate::error::Result;
use crate::naming;
use crate::node_list::BemNodeList;
use crate::nodes::BemNodes;
use crate::options::NodesOptions;
use crate::selector::descendants_with_class;

/// Resolved BEM identity of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BemIdentity {
    pub block: String,
    pub element: Option<String>,
    pub modifiers: Vec<String>,
}

/// A DOM element seen through BEM naming rules.
#[derive(Clone)]
pub struct BemElement<'a> {
    node: NodeRef<'a>,
}

impl<'a> From<NodeRef<'a>> for BemElement<'a> {
    fn from(node: NodeRef<'a>) -> Self {
        Self::new(node)
    }
}

impl<'a> BemElement<'a> {
    pub fn new(node: NodeRef<'a>) -> Self {
        Self { node }
    }

    /// The wrapped DOM node.
    pub fn node(&self) -> &NodeRef<'a> {
        &self.node
    }

    pub fn into_node(self) -> NodeRef<'a> {
        self.node
    }

    /// Class list view used for mutations.
    pub fn class_bag(&self) -> ClassBag<'a> {
        ClassBag::new(&self.node)
    }

    fn classes(&self) -> Vec<String> {
        read_classes(&self.node)
    }

    /// Block name; see [`naming::block_name`].
    pub fn block_name(&self, needle: Option<&str>) -> Option<String> {
        naming::block_name(&self.classes(), needle)
    }

    /// Element name, `None` for bare block nodes; see [`naming::element_name`].
    pub fn element_name(&self, required_block: Option<&str>) -> Option<String> {
        naming::element_name(&self.classes(), required_block)
    }

    /// Modifiers in class order; `None` only when the element has no classes.
    pub fn modifiers(&self, required_block: Option<&str>) -> Option<Vec<String>> {
        naming::modifiers(&self.classes(), required_block)
    }

    /// Block, element and modifiers in one read of the class attribute.
    pub fn identity(&self, required_block: Option<&str>) -> Option<BemIdentity> {
        let classes = self.classes();
        let block = match required_block.filter(|b| !b.is_empty()) {
            Some(required) => naming::block_name(&classes, Some(required))?,
            None => naming::block_name(&classes, None)?,
        };
        Some(BemIdentity {
            element: naming::element_name(&classes, Some(&block)),
            modifiers: naming::modifiers(&classes, Some(&block)).unwrap_or_default(),
            block,
        })
    }

    pub fn has_modifier(&self, modifier: &str, required_block: Option<&str>) -> bool {
        self.modifiers(required_block)
            .is_some_and(|mods| mods.iter().any(|m| m == modifier))
    }

    /// Adds (`Some(true)`), removes (`Some(false)`) or flips (`None`) a modifier.
    ///
    /// The modifier class is built from the forced or resolved block name and
    /// the element name resolved against that block. Does nothing when no block
    /// name can be determined.
    pub fn toggle_modifier(&self, modifier: &str, force: Option<bool>, required_block: Option<&str>) {
        let Some(class) = naming::modifier_class(&self.classes(), modifier, required_block) else {
            debug!(modifier, "no block name resolvable, modifier not applied");
            return;
        };
        self.class_bag().toggle(&class, force);
    }

    pub fn add_modifier(&self, modifier: &str, required_block: Option<&str>) {
        self.toggle_modifier(modifier, Some(true), required_block);
    }

    pub fn remove_modifier(&self, modifier: &str, required_block: Option<&str>) {
        self.toggle_modifier(modifier, Some(false), required_block);
    }

    /// Outermost ancestor carrying the same block name, or this element.
    ///
    /// The walk does not stop at ancestors of other blocks or unclassed
    /// wrappers; it goes all the way up to the document.
    pub fn block_root(&self, required_block: Option<&str>) -> BemElement<'a> {
        let block = match required_block.filter(|b| !b.is_empty()) {
            Some(required) => required.to_string(),
            None => match self.block_name(None) {
                Some(block) => block,
                None => return self.clone(),
            },
        };

        let mut highest = self.node.clone();
        let mut current = self.node.parent();
        while let Some(ancestor) = current {
            if ancestor.is_element()
                && naming::block_name(&read_classes(&ancestor), None).as_deref() == Some(block.as_str())
            {
                highest = ancestor.clone();
            }
            current = ancestor.parent();
        }
        BemElement::new(highest)
    }

    /// Node collection rooted at this element.
    pub fn nodes(&self, must_include: &[&str], required_block: Option<&str>) -> Result<BemNodes<'a>> {
        let opts = NodesOptions {
            must_include: must_include.iter().map(|k| k.to_string()).collect(),
            block_name: required_block.map(str::to_string),
            ..Default::default()
        };
        BemNodes::from_elements(vec![self.node.clone()], &opts)
    }

    /// Elements named `element_name` (optionally with `modifier`) inside this
    /// element's block.
    ///
    /// With `find_root` the search starts at the block root. The search root is
    /// placed first when it matches itself. Returns `None` when nothing matches.
    pub fn find(
        &self,
        element_name: &str,
        modifier: Option<&str>,
        find_root: bool,
        required_block: Option<&str>,
    ) -> Option<BemNodeList<'a>> {
        let root = if find_root {
            self.block_root(required_block)
        } else {
            self.clone()
        };

        let block = match required_block.filter(|b| !b.is_empty()) {
            Some(required) => required.to_string(),
            None => root.block_name(None)?,
        };

        let root_matches = root.element_name(Some(&block)).as_deref() == Some(element_name)
            && modifier.map_or(true, |m| root.has_modifier(m, Some(&block)));

        let class = naming::compose_class(&block, Some(element_name), modifier);
        let mut found = descendants_with_class(&root.node, &class);
        if root_matches {
            found.insert(0, root.node.clone());
        }
        trace!(class = %class, matches = found.len(), "find");

        if found.is_empty() {
            return None;
        }

        let mut list = BemNodeList::from_nodes(found);
        list.set_block_name(block);
        Some(list)
    }
}
