//! Dirty-flag bookkeeping.
//!
//! Every mutation marks the touched id in one or more category sets and
//! marks `structure` when the tree topology changes. The store exposes
//! but never clears these flags — clearing is a consumer (renderer)
//! responsibility, orthogonal to the store's own correctness.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::ids::{BindingId, ElementId, EventId, GroupId, VariableId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirtyFlags {
    pub elements: IndexSet<ElementId>,
    pub variables: IndexSet<VariableId>,
    pub events: IndexSet<EventId>,
    pub bindings: IndexSet<BindingId>,
    pub conditionals: IndexSet<GroupId>,
    pub loops: IndexSet<ElementId>,
    pub structure: bool,
}

impl DirtyFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_element(&mut self, id: ElementId) {
        self.elements.insert(id);
    }

    pub fn mark_variable(&mut self, id: VariableId) {
        self.variables.insert(id);
    }

    pub fn mark_event(&mut self, id: EventId) {
        self.events.insert(id);
    }

    pub fn mark_binding(&mut self, id: BindingId) {
        self.bindings.insert(id);
    }

    pub fn mark_conditional(&mut self, id: GroupId) {
        self.conditionals.insert(id);
    }

    pub fn mark_loop(&mut self, id: ElementId) {
        self.loops.insert(id);
    }

    pub fn mark_structure(&mut self) {
        self.structure = true;
    }
}
