//! IR Compiler: turns a frozen [`crate::document::Document`] into
//! standalone JS source defining `mount(target) -> { destroy() }`, with
//! no runtime library.

mod assemble;
mod deps;
mod emit;
mod graph;
mod naming;
mod util;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::CompileError;

pub use deps::{DepMap, VarDeps};
pub use graph::{GraphNode, NodeKind};

use emit::Context;
use graph::Graph;

/// Compiles `doc` into JS source. `timestamp` becomes the leading
/// comment; everything else is a pure function of the document.
pub fn compile(doc: &Document, timestamp: u64) -> Result<String, CompileError> {
    let graph = Graph::build(doc);
    let deps = deps::analyze(doc);
    let mut ctx = Context::new(doc, &deps);

    emit::variables::emit_all(&mut ctx);
    emit::elements::emit_tree(&mut ctx)?;
    emit::loops::emit_all(&mut ctx, &graph)?;
    emit::conditionals::emit_all(&mut ctx, &graph)?;
    emit::bindings::emit_all(&mut ctx)?;
    emit::events::emit_all(&mut ctx)?;

    Ok(assemble::assemble(&ctx.buckets, timestamp))
}

/// Introspection snapshot for tooling: the node graph, dependency map,
/// bindings and events, all as they stood at compile time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerDebug {
    pub nodes: Vec<GraphNode>,
    pub deps: DepMap,
    pub bindings: Vec<crate::document::Binding>,
    pub events: Vec<crate::document::Event>,
}

/// Builds a [`CompilerDebug`] snapshot without compiling to JS.
pub fn debug(doc: &Document) -> CompilerDebug {
    let graph = Graph::build(doc);
    let deps = deps::analyze(doc);
    let events = doc.events.values().flatten().cloned().collect();
    CompilerDebug {
        nodes: graph.nodes(),
        deps,
        bindings: doc.bindings.clone(),
        events,
    }
}

#[cfg(test)]
mod tests {
    use crate::document::{ElementSpec, VariableSpec, VariableType};
    use crate::store::Store;
    use crate::value::Value;

    use super::*;

    /// Scenario: a reactive counter with a click handler and a bound
    /// label re-renders the label without recreating the button.
    #[test]
    fn reactive_counter_compiles_a_working_mount() {
        let mut store = Store::new();
        store
            .tx("setup", |s| {
                let root = s.create(ElementSpec {
                    kind: "layout".into(),
                    tag: "div".into(),
                    parent: None,
                    text: None,
                })?;
                s.var(VariableSpec::new("count", VariableType::Reactive, Value::number(0.0)))?;

                let label = s.create(ElementSpec {
                    kind: "text".into(),
                    tag: "span".into(),
                    parent: Some(root.clone()),
                    text: None,
                })?;
                s.bind_text(&label, "count")?;

                let button = s.create(ElementSpec {
                    kind: "button".into(),
                    tag: "button".into(),
                    parent: Some(root.clone()),
                    text: Some("+1".into()),
                })?;
                s.on(
                    "click",
                    &button,
                    crate::document::Action::Update {
                        target: "count".to_string(),
                        op: crate::document::UpdateOp::AddAssign,
                        value: "1".to_string(),
                    },
                )?;

                Ok(())
            })
            .unwrap();

        let frozen = store.get_ir();
        let src = compile(frozen.get(), 1700000000).unwrap();

        assert!(src.starts_with("// generated 1700000000"));
        assert!(src.contains("const count = {"));
        assert!(src.contains("_u_count();"));
        assert!(src.contains("function _h0_click()"));
        assert!(src.contains("count.value += 1;"));
        assert!(src.contains("export function mount(target)"));
        assert!(src.contains("destroy()"));
    }

    /// Scenario: a document with no root element fails compilation
    /// instead of emitting a broken `mount`.
    #[test]
    fn empty_document_fails_with_missing_root() {
        let doc = Document::new(0);
        assert_eq!(compile(&doc, 0), Err(CompileError::MissingRoot));
    }

    #[test]
    fn debug_reports_nodes_and_dependencies() {
        let mut store = Store::new();
        let root = store
            .tx("setup", |s| {
                let root = s.create(ElementSpec {
                    kind: "layout".into(),
                    tag: "div".into(),
                    parent: None,
                    text: None,
                })?;
                s.var(VariableSpec::new("count", VariableType::Reactive, Value::number(0.0)))?;
                Ok(root)
            })
            .unwrap();

        let frozen = store.get_ir();
        let snapshot = debug(frozen.get());
        assert!(snapshot.nodes.iter().any(|n| n.id == root.to_string() && n.kind == NodeKind::Root));
        assert!(snapshot.deps.contains_key("count"));
    }
}
