//! Variable-to-dependent dependency analysis.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::document::{Action, Document, VariableType};
use crate::ids::VariableName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDeps {
    pub var_type: VariableType,
    /// Ids of whatever subscribes to this variable's changes: element
    /// ids (bindings, event targets), group ids (conditional
    /// expressions), or element ids again (loop sources).
    pub subs: IndexSet<String>,
}

pub type DepMap = IndexMap<VariableName, VarDeps>;

pub(crate) fn analyze(doc: &Document) -> DepMap {
    let mut deps: DepMap = doc
        .variables
        .iter()
        .map(|v| {
            (
                v.name.clone(),
                VarDeps {
                    var_type: v.var_type,
                    subs: IndexSet::new(),
                },
            )
        })
        .collect();

    for binding in &doc.bindings {
        if let Some(d) = deps.get_mut(&binding.variable) {
            d.subs.insert(binding.element_id.to_string());
        }
    }

    for events in doc.events.values() {
        for event in events {
            let target = match &event.action {
                Action::Update { target, .. } | Action::Set { target, .. } => Some(target),
                Action::Call { .. } | Action::Unknown => None,
            };
            if let Some(target) = target
                && let Some(d) = deps.get_mut(target)
            {
                d.subs.insert(event.target.to_string());
            }
        }
    }

    for (group_id, group) in &doc.conditional_groups {
        for member in group.members() {
            let Some(element) = doc.elements.get(member) else { continue };
            let Some(control) = &element.control else { continue };
            let Some(expr) = &control.expr else { continue };
            for token in tokenize(expr) {
                if let Some(d) = deps.get_mut(&token) {
                    d.subs.insert(group_id.to_string());
                }
            }
        }
    }

    for (id, element) in &doc.elements.nodes {
        if let Some(loop_desc) = &element.loop_
            && let Some(d) = deps.get_mut(&loop_desc.source)
        {
            d.subs.insert(id.to_string());
        }
    }

    deps
}

/// Tokenizes a JS-ish expression on `[A-Za-z_$][A-Za-z0-9_$]*`, the
/// pattern used to spot variable-name references inside `control.expr`.
fn tokenize(expr: &str) -> Vec<String> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_alphabetic() || c == '_' || c == '$' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_' || chars[i] == '$') {
                i += 1;
            }
            tokens.push(chars[start..i].iter().collect());
        } else {
            i += 1;
        }
    }
    tokens
}
