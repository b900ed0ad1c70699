//! Shape validators for conditional-group and loop invariants.
//! Violations are collected and returned, never thrown.

use serde::{Deserialize, Serialize};

use crate::document::{ControlType, Document};
use crate::ids::{ElementId, GroupId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub group_id: Option<GroupId>,
    pub element_id: Option<ElementId>,
    pub message: String,
}

/// Sibling-parent rule and overall group shape.
pub(crate) fn check_conditional_groups(doc: &Document) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (group_id, group) in &doc.conditional_groups {
        let Some(if_element) = doc.elements.get(&group.if_) else {
            violations.push(Violation {
                group_id: Some(group_id.clone()),
                element_id: Some(group.if_.clone()),
                message: "group's if element no longer exists".to_string(),
            });
            continue;
        };

        match &if_element.control {
            Some(c) if c.control_type == ControlType::If => {
                if c.expr.as_deref().unwrap_or("").is_empty() {
                    violations.push(Violation {
                        group_id: Some(group_id.clone()),
                        element_id: Some(group.if_.clone()),
                        message: "if element has an empty expression".to_string(),
                    });
                }
            }
            _ => violations.push(Violation {
                group_id: Some(group_id.clone()),
                element_id: Some(group.if_.clone()),
                message: "if element's control metadata is missing or not type if".to_string(),
            }),
        }

        let parent = if_element.parent.clone();

        for elif_id in &group.elif {
            check_sibling_and_expr(doc, group_id, elif_id, &parent, ControlType::Elif, &mut violations);
        }

        if let Some(else_id) = &group.else_ {
            if let Some(else_element) = doc.elements.get(else_id) {
                if else_element.parent != parent {
                    violations.push(Violation {
                        group_id: Some(group_id.clone()),
                        element_id: Some(else_id.clone()),
                        message: "else element does not share the if element's parent".to_string(),
                    });
                }
                match &else_element.control {
                    Some(c) if c.control_type == ControlType::Else => {
                        if c.expr.is_some() {
                            violations.push(Violation {
                                group_id: Some(group_id.clone()),
                                element_id: Some(else_id.clone()),
                                message: "else element carries an expression".to_string(),
                            });
                        }
                    }
                    _ => violations.push(Violation {
                        group_id: Some(group_id.clone()),
                        element_id: Some(else_id.clone()),
                        message: "else element's control metadata is missing or not type else".to_string(),
                    }),
                }
            } else {
                violations.push(Violation {
                    group_id: Some(group_id.clone()),
                    element_id: Some(else_id.clone()),
                    message: "group's else element no longer exists".to_string(),
                });
            }
        }
    }

    // Surviving elif/else elements whose control still references a
    // dissolved group are flagged here rather than silently ignored.
    for (id, element) in &doc.elements.nodes {
        if let Some(control) = &element.control
            && !doc.conditional_groups.contains_key(&control.group)
        {
            violations.push(Violation {
                group_id: Some(control.group.clone()),
                element_id: Some(id.clone()),
                message: "element's control references a dissolved conditional group".to_string(),
            });
        }
    }

    violations
}

fn check_sibling_and_expr(
    doc: &Document,
    group_id: &GroupId,
    element_id: &ElementId,
    expected_parent: &Option<ElementId>,
    expected_type: ControlType,
    violations: &mut Vec<Violation>,
) {
    let Some(element) = doc.elements.get(element_id) else {
        violations.push(Violation {
            group_id: Some(group_id.clone()),
            element_id: Some(element_id.clone()),
            message: "group member no longer exists".to_string(),
        });
        return;
    };
    if &element.parent != expected_parent {
        violations.push(Violation {
            group_id: Some(group_id.clone()),
            element_id: Some(element_id.clone()),
            message: "element does not share the if element's parent".to_string(),
        });
    }
    match &element.control {
        Some(c) if c.control_type == expected_type => {
            if c.expr.as_deref().unwrap_or("").is_empty() {
                violations.push(Violation {
                    group_id: Some(group_id.clone()),
                    element_id: Some(element_id.clone()),
                    message: "elif element has an empty expression".to_string(),
                });
            }
        }
        _ => violations.push(Violation {
            group_id: Some(group_id.clone()),
            element_id: Some(element_id.clone()),
            message: "elif element's control metadata is missing or of the wrong type".to_string(),
        }),
    }
}

/// A loop alias/index must be a syntactically valid JS identifier:
/// starts with a letter, `_`, or `$`, followed by identifier
/// characters. Shared with `store::loops`, which enforces this at
/// mutation time; the validator re-checks it for hand-constructed IR.
pub(crate) fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Loop alias/index identifiers and source existence.
pub(crate) fn check_loops(doc: &Document) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (id, element) in &doc.elements.nodes {
        let Some(loop_desc) = &element.loop_ else { continue };
        if !doc.variables.name_exists(&loop_desc.source) {
            violations.push(Violation {
                group_id: None,
                element_id: Some(id.clone()),
                message: format!("loop source '{}' does not exist", loop_desc.source),
            });
        }
        if !is_valid_identifier(&loop_desc.alias) {
            violations.push(Violation {
                group_id: None,
                element_id: Some(id.clone()),
                message: format!("loop alias '{}' is not a valid identifier", loop_desc.alias),
            });
        }
        if let Some(index) = &loop_desc.index
            && !is_valid_identifier(index)
        {
            violations.push(Violation {
                group_id: None,
                element_id: Some(id.clone()),
                message: format!("loop index '{}' is not a valid identifier", index),
            });
        }
    }
    violations
}
