//! Code-fragment emission into the five ordered buckets that
//! [`super::assemble`] joins into the final source.

pub(crate) mod bindings;
pub(crate) mod conditionals;
pub(crate) mod elements;
pub(crate) mod events;
pub(crate) mod loops;
pub(crate) mod variables;

use std::collections::HashSet;

use crate::document::Document;
use crate::ids::VariableName;

use super::deps::DepMap;
use super::naming::Namer;

/// The five ordered code-fragment buckets named in the pipeline:
/// declarations, state, functions, lifecycle, cleanup.
#[derive(Debug, Default)]
pub(crate) struct Buckets {
    pub declarations: Vec<String>,
    pub state: Vec<String>,
    pub functions: Vec<String>,
    pub lifecycle: Vec<String>,
    pub cleanup: Vec<String>,
}

/// Shared state threaded through every emission stage: the frozen
/// document, its dependency map, element holder names, and the
/// accumulating buckets.
pub(crate) struct Context<'a> {
    pub doc: &'a Document,
    pub deps: &'a DepMap,
    pub namer: Namer,
    pub buckets: Buckets,
    /// Holder names that already have a `let` statement in the
    /// declarations bucket, so a holder revisited from a second emission
    /// stage (loop body, conditional branch) doesn't redeclare it.
    pub declared: HashSet<String>,
}

impl<'a> Context<'a> {
    pub fn new(doc: &'a Document, deps: &'a DepMap) -> Self {
        Self {
            doc,
            deps,
            namer: Namer::new(),
            buckets: Buckets::default(),
            declared: HashSet::new(),
        }
    }

    /// Whether the output needs to read `name`'s current value. Reactive
    /// and fetch variables are spelled `name.value`; static is spelled
    /// `name`.
    pub fn access(&self, name: &VariableName) -> String {
        match self.deps.get(name) {
            Some(d) if d.var_type == crate::document::VariableType::Static => name.clone(),
            Some(_) => format!("{name}.value"),
            None => name.clone(),
        }
    }

    /// `true` if `name` has at least one binding, i.e. `bindings::emit_all`
    /// will actually generate an `_u_<name>()` function for it. A variable
    /// can have non-binding subscribers (an event target, a conditional
    /// expression, a loop source) with no `_u_<name>` to call.
    pub fn has_binding(&self, name: &VariableName) -> bool {
        self.doc.bindings.iter().any(|b| &b.variable == name)
    }
}
