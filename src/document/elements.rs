//! The element tree container: a flat id-keyed map plus a root pointer.
//!
//! The tree is never represented as a pointer graph — only as id-keyed
//! maps and sequences of ids — so snapshotting is a straightforward
//! recursive clone.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ids::ElementId;

use super::element::Element;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Elements {
    pub root_id: Option<ElementId>,
    pub nodes: IndexMap<ElementId, Element>,
}

impl Elements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id)
    }

    /// Descendants of `id`, including `id` itself, in pre-order.
    pub fn subtree(&self, id: &ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![id.clone()];
        while let Some(next) = stack.pop() {
            if let Some(el) = self.nodes.get(&next) {
                stack.extend(el.children.iter().rev().cloned());
            }
            out.push(next);
        }
        out
    }
}
