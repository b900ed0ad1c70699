//! Node graph mirroring the IR: one node per variable, non-grouped
//! element, loop, and conditional group, plus a root entry.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::ids::{ElementId, GroupId, VariableName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Var,
    Element,
    Loop,
    Conditional,
    Root,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
}

/// The compiler's view of the IR: which elements are plain, which carry
/// a loop, which belong to a conditional group (and are therefore owned
/// by that group's node rather than visited standalone).
#[derive(Debug, Clone, Default)]
pub(crate) struct Graph {
    pub vars: Vec<VariableName>,
    pub elements: Vec<ElementId>,
    pub loops: Vec<ElementId>,
    pub conditionals: Vec<GroupId>,
    pub root: Option<ElementId>,
}

impl Graph {
    pub fn build(doc: &Document) -> Self {
        let vars = doc.variables.iter().map(|v| v.name.clone()).collect();

        let mut elements = Vec::new();
        let mut loops = Vec::new();
        for (id, element) in &doc.elements.nodes {
            if element.loop_.is_some() {
                loops.push(id.clone());
            } else if element.control.is_none() {
                elements.push(id.clone());
            }
            // Elements carrying `control` are owned by their conditional
            // group's node and are never visited as standalone elements.
        }

        let conditionals = doc.conditional_groups.keys().cloned().collect();

        Graph {
            vars,
            elements,
            loops,
            conditionals,
            root: doc.elements.root_id.clone(),
        }
    }

    pub fn nodes(&self) -> Vec<GraphNode> {
        let mut nodes = Vec::new();
        if let Some(root) = &self.root {
            nodes.push(GraphNode {
                id: root.to_string(),
                kind: NodeKind::Root,
            });
        }
        nodes.extend(self.vars.iter().map(|name| GraphNode {
            id: name.clone(),
            kind: NodeKind::Var,
        }));
        nodes.extend(self.elements.iter().map(|id| GraphNode {
            id: id.to_string(),
            kind: NodeKind::Element,
        }));
        nodes.extend(self.loops.iter().map(|id| GraphNode {
            id: id.to_string(),
            kind: NodeKind::Loop,
        }));
        nodes.extend(self.conditionals.iter().map(|id| GraphNode {
            id: id.to_string(),
            kind: NodeKind::Conditional,
        }));
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ElementSpec, VariableSpec, VariableType};
    use crate::store::Store;
    use crate::value::Value;

    #[test]
    fn grouped_elements_are_excluded_from_the_plain_element_list() {
        let mut store = Store::new();
        let root = store
            .tx("setup", |s| {
                let root = s.create(ElementSpec {
                    kind: "layout".into(),
                    tag: "div".into(),
                    parent: None,
                    text: None,
                })?;
                s.var(VariableSpec::new("flag", VariableType::Reactive, Value::Bool(true)))?;
                let (_, _if_id) = s.create_if_group(
                    &root,
                    "flag.value",
                    ElementSpec {
                        kind: "text".into(),
                        tag: "p".into(),
                        parent: None,
                        text: Some("Yes".into()),
                    },
                )?;
                Ok(root)
            })
            .unwrap();

        let doc = store.get_ir();
        let graph = Graph::build(doc.get());
        assert_eq!(graph.root, Some(root.clone()));
        assert_eq!(graph.elements, vec![root]);
        assert_eq!(graph.conditionals.len(), 1);
    }
}
