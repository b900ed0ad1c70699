//! IR Document — the passive data model (L0).
//!
//! A [`Document`] is pure data: five cross-referenced collections plus
//! dirty-flag bookkeeping. It enforces nothing on its own; structural
//! invariants are the responsibility of [`crate::store::Store`], which
//! is the only thing permitted to construct or mutate one.

pub mod binding;
pub mod conditional;
pub mod dirty;
pub mod element;
pub mod elements;
pub mod event;
pub mod variable;
pub mod variables;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ids::GroupId;

pub use binding::{Binding, BindingKind};
pub use conditional::ConditionalGroup;
pub use dirty::DirtyFlags;
pub use element::{Control, ControlType, Element, ElementKind, ElementSpec, LoopDescriptor};
pub use elements::Elements;
pub use event::{Action, Event, EventType, UpdateOp};
pub use variable::{Variable, VariableSpec, VariableType};
pub use variables::Variables;

/// Document metadata. `version` begins at `"2.0.0"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub version: String,
    /// Caller-supplied creation timestamp; the document never reads the
    /// system clock itself so that derived artifacts stay reproducible.
    pub created: u64,
    pub modified: u64,
}

impl Meta {
    pub fn new(timestamp: u64) -> Self {
        Self {
            version: "2.0.0".to_string(),
            created: timestamp,
            modified: timestamp,
        }
    }
}

/// The root of the IR: elements, variables, bindings, events and
/// conditional groups, plus dirty-flag bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub meta: Meta,
    pub variables: Variables,
    pub elements: Elements,
    pub events: IndexMap<EventType, Vec<Event>>,
    pub bindings: Vec<Binding>,
    pub conditional_groups: IndexMap<GroupId, ConditionalGroup>,
    pub dirty: DirtyFlags,
}

impl Document {
    pub fn new(timestamp: u64) -> Self {
        Self {
            meta: Meta::new(timestamp),
            variables: Variables::new(),
            elements: Elements::new(),
            events: IndexMap::new(),
            bindings: Vec::new(),
            conditional_groups: IndexMap::new(),
            dirty: DirtyFlags::new(),
        }
    }

    /// Structurally recursive clone, rebuilding maps/sets/sequences
    /// rather than sharing any backing storage. `Document`'s fields are
    /// all owned, so `Clone::clone` already satisfies this; the named
    /// method exists so call sites read as deliberate snapshot points
    /// rather than incidental clones.
    pub fn deep_clone(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_has_no_root_and_empty_collections() {
        let doc = Document::new(0);
        assert!(doc.elements.root_id.is_none());
        assert!(doc.elements.nodes.is_empty());
        assert!(doc.variables.iter().next().is_none());
        assert!(doc.bindings.is_empty());
        assert_eq!(doc.meta.version, "2.0.0");
    }

    #[test]
    fn deep_clone_does_not_alias() {
        let mut doc = Document::new(0);
        let snapshot = doc.deep_clone();
        doc.meta.modified = 99;
        assert_eq!(snapshot.meta.modified, 0);
    }
}
