// ABOUTME: Listener registry standing in for DOM event targets on parsed documents.
// ABOUTME: Supports add/remove with a capture flag and capture/target/bubble dispatch.

//! Event listeners.
//!
//! Parsed documents have no native event targets, so listeners are kept in a
//! registry keyed by node id and event type. A registration is identified by
//! the listener's `Rc` allocation plus its capture flag, mirroring
//! `addEventListener` deduplication.

use std::collections::HashMap;
use std::rc::Rc;

use dom_query::{NodeId, NodeRef};

/// Propagation phase an event is delivered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Capturing,
    AtTarget,
    Bubbling,
}

/// Event handed to listeners.
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: String,
    pub target: NodeId,
    pub current_target: NodeId,
    pub phase: EventPhase,
}

/// Shared callback; clone the `Rc` to remove the same listener later.
pub type Listener = Rc<dyn Fn(&Event)>;

struct Registration {
    listener: Listener,
    capture: bool,
}

impl Registration {
    fn is(&self, listener: &Listener, capture: bool) -> bool {
        self.capture == capture && same_listener(&self.listener, listener)
    }
}

fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Listener table for the nodes of one document.
#[derive(Default)]
pub struct EventRegistry {
    entries: HashMap<(NodeId, String), Vec<Registration>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` on `node`; registering the same listener and
    /// capture flag twice has no effect.
    pub fn add_listener(&mut self, node: &NodeRef, event_type: &str, listener: Listener, capture: bool) {
        let slot = self
            .entries
            .entry((node.id, event_type.to_string()))
            .or_default();
        if slot.iter().any(|r| r.is(&listener, capture)) {
            return;
        }
        slot.push(Registration { listener, capture });
    }

    /// Removes a registration made with the same listener and capture flag.
    pub fn remove_listener(&mut self, node: &NodeRef, event_type: &str, listener: &Listener, capture: bool) {
        let key = (node.id, event_type.to_string());
        if let Some(slot) = self.entries.get_mut(&key) {
            slot.retain(|r| !r.is(listener, capture));
            if slot.is_empty() {
                self.entries.remove(&key);
            }
        }
    }

    /// Number of listeners registered on `node` for `event_type`.
    pub fn listener_count(&self, node: &NodeRef, event_type: &str) -> usize {
        self.entries
            .get(&(node.id, event_type.to_string()))
            .map_or(0, Vec::len)
    }

    /// Fires `event_type` at `target`: capture listeners from the outermost
    /// ancestor inwards, every listener on the target, then bubble listeners
    /// outwards. Returns how many listeners ran.
    pub fn dispatch(&self, target: &NodeRef, event_type: &str) -> usize {
        let mut path = Vec::new();
        let mut current = target.parent();
        while let Some(node) = current {
            path.push(node.id);
            current = node.parent();
        }

        let mut invoked = 0;
        for &ancestor in path.iter().rev() {
            invoked += self.deliver(target.id, ancestor, event_type, EventPhase::Capturing);
        }
        invoked += self.deliver(target.id, target.id, event_type, EventPhase::AtTarget);
        for &ancestor in &path {
            invoked += self.deliver(target.id, ancestor, event_type, EventPhase::Bubbling);
        }
        invoked
    }

    fn deliver(&self, target: NodeId, current: NodeId, event_type: &str, phase: EventPhase) -> usize {
        let Some(slot) = self.entries.get(&(current, event_type.to_string())) else {
            return 0;
        };

        let event = Event {
            event_type: event_type.to_string(),
            target,
            current_target: current,
            phase,
        };

        let mut invoked = 0;
        for registration in slot {
            let wanted = match phase {
                EventPhase::Capturing => registration.capture,
                EventPhase::AtTarget => true,
                EventPhase::Bubbling => !registration.capture,
            };
            if wanted {
                (registration.listener)(&event);
                invoked += 1;
            }
        }
        invoked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;
    use std::cell::RefCell;

    fn node<'a>(doc: &'a Document, css: &str) -> NodeRef<'a> {
        doc.select(css).nodes().first().cloned().unwrap()
    }

    #[test]
    fn test_duplicate_registration_is_ignored() {
        let doc = Document::from(r#"<button id="b"></button>"#);
        let button = node(&doc, "#b");
        let mut registry = EventRegistry::new();
        let listener: Listener = Rc::new(|_: &Event| {});

        registry.add_listener(&button, "click", listener.clone(), false);
        registry.add_listener(&button, "click", listener.clone(), false);
        registry.add_listener(&button, "click", listener.clone(), true);
        assert_eq!(registry.listener_count(&button, "click"), 2);

        registry.remove_listener(&button, "click", &listener, false);
        assert_eq!(registry.listener_count(&button, "click"), 1);
        registry.remove_listener(&button, "click", &listener, true);
        assert_eq!(registry.listener_count(&button, "click"), 0);
    }

    #[test]
    fn test_dispatch_order() {
        let doc = Document::from(r#"<div id="outer"><span id="inner"></span></div>"#);
        let outer = node(&doc, "#outer");
        let inner = node(&doc, "#inner");
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventRegistry::new();

        for (name, capture) in [("outer-capture", true), ("outer-bubble", false)] {
            let log = log.clone();
            registry.add_listener(&outer, "click", Rc::new(move |_: &Event| log.borrow_mut().push(name)), capture);
        }
        {
            let log = log.clone();
            registry.add_listener(&inner, "click", Rc::new(move |e: &Event| {
                assert_eq!(e.phase, EventPhase::AtTarget);
                log.borrow_mut().push("target");
            }), false);
        }

        assert_eq!(registry.dispatch(&inner, "click"), 3);
        assert_eq!(*log.borrow(), vec!["outer-capture", "target", "outer-bubble"]);
    }

    #[test]
    fn test_dispatch_without_listeners() {
        let doc = Document::from(r#"<p id="p"></p>"#);
        let registry = EventRegistry::new();
        assert_eq!(registry.dispatch(&node(&doc, "#p"), "click"), 0);
    }
}
