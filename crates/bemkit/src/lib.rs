// ABOUTME: Main library entry point for bemkit, BEM naming helpers over an HTML DOM.
// ABOUTME: Re-exports the public API: BemElement, BemNodeList, BemNodes, NodesBuilder, BemError.

//! bemkit - BEM (Block-Element-Modifier) conventions over a parsed DOM.
//!
//! This crate interprets `class` attributes following the
//! `block__element--modifier` convention. It resolves the block, element and
//! modifiers of an element, mutates modifier classes, collects the elements of
//! a block into a keyed collection and finds elements by BEM name.
//!
//! # Example
//!
//! ```
//! use bemkit::{BemElement, BemNodes, Target};
//! use dom_query::Document;
//!
//! let doc = Document::from(r#"<div id="c" class="card"><h2 class="card__title"></h2></div>"#);
//! let card = BemElement::new(doc.select("#c").nodes()[0].clone());
//! assert_eq!(card.block_name(None).as_deref(), Some("card"));
//!
//! let nodes = BemNodes::builder()
//!     .must_include(["title"])
//!     .build(&doc, Target::from("#c"))
//!     .unwrap();
//! nodes.get("title").unwrap().add_modifier_for_all("active");
//! assert_eq!(doc.select(".card__title--active").length(), 1);
//! ```

pub mod class_bag;
pub mod element;
pub mod error;
pub mod events;
pub mod naming;
pub mod node_list;
pub mod nodes;
pub mod options;
pub mod selector;

pub use crate::class_bag::ClassBag;
pub use crate::element::{BemElement, BemIdentity};
pub use crate::error::{BemError, Result};
pub use crate::events::{Event, EventPhase, EventRegistry, Listener};
pub use crate::naming::BARE_BLOCK_KEY;
pub use crate::node_list::{BemNodeList, StateTarget};
pub use crate::nodes::{BemNodes, KeySummary, NodesSummary, Target};
pub use crate::options::{NodesBuilder, NodesOptions, Traversal};
