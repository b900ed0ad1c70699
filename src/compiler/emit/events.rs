//! Event emission: one named handler per event, an `_attach()` that
//! wires every handler, and matching cleanup teardown.

use crate::document::Action;
use crate::error::CompileError;

use super::super::util::{indent, json_string};
use super::Context;

pub(crate) fn emit_all(ctx: &mut Context) -> Result<(), CompileError> {
    let mut attach = Vec::new();
    let mut index = 0u64;

    let event_types: Vec<_> = ctx.doc.events.keys().cloned().collect();
    for event_type in event_types {
        let events = ctx.doc.events.get(&event_type).cloned().unwrap_or_default();
        for event in events {
            let holder = ctx
                .namer
                .existing_holder(&event.target)
                .ok_or_else(|| CompileError::EventUnknownElement(event.target.clone()))?
                .to_string();
            let handler_name = format!("_h{index}_{event_type}");
            index += 1;

            let stmt = match &event.action {
                Action::Update { target, op, value } => {
                    format!("{} {} {value};", ctx.access(target), op.token())
                }
                Action::Set { target, value } => format!("{} = {value};", ctx.access(target)),
                Action::Call { function } => format!("{function}();"),
                Action::Unknown => "// unrecognised action, compiled as a no-op".to_string(),
            };

            ctx.buckets
                .functions
                .push(format!("function {handler_name}() {{\n{}\n}}", indent(&[stmt])));

            attach.push(format!(
                "{holder}.addEventListener({}, {handler_name});",
                json_string(&event_type)
            ));
            ctx.buckets.cleanup.push(format!(
                "{holder}.removeEventListener({}, {handler_name});",
                json_string(&event_type)
            ));
        }
    }

    if !attach.is_empty() {
        ctx.buckets
            .functions
            .push(format!("function _attach() {{\n{}\n}}", indent(&attach)));
        ctx.buckets.lifecycle.push("_attach();".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use crate::compiler::deps;
    use crate::compiler::emit::elements;
    use crate::document::{Document, Element, Event, UpdateOp};
    use crate::ids::{ElementId, EventId};

    use super::*;

    fn doc_with_click_event() -> Document {
        let mut doc = Document::new(0);
        doc.variables.insert(crate::document::Variable::new(
            crate::ids::VariableId::mint(1, 0),
            "count",
            crate::document::VariableType::Reactive,
            crate::value::Value::number(0.0),
        ));
        let root_id = ElementId::mint(1, 0);
        let root = Element::new(root_id.clone(), "button", "button");
        doc.elements.nodes.insert(root_id.clone(), root);
        doc.elements.root_id = Some(root_id.clone());

        let mut events: IndexMap<String, Vec<Event>> = IndexMap::new();
        events.insert(
            "click".to_string(),
            vec![Event {
                id: EventId::mint(1, 0),
                target: root_id,
                action: Action::Update {
                    target: "count".to_string(),
                    op: UpdateOp::AddAssign,
                    value: "1".to_string(),
                },
            }],
        );
        doc.events = events;
        doc
    }

    #[test]
    fn click_handler_translates_update_action_and_attaches() {
        let doc = doc_with_click_event();
        let deps = deps::analyze(&doc);
        let mut ctx = Context::new(&doc, &deps);
        elements::emit_tree(&mut ctx).unwrap();
        emit_all(&mut ctx).unwrap();

        let src = ctx.buckets.functions.join("\n");
        assert!(src.contains("function _h0_click() {"));
        assert!(src.contains("count.value += 1;"));
        assert!(src.contains("e1.addEventListener(\"click\", _h0_click);"));
        assert_eq!(ctx.buckets.lifecycle, vec!["_attach();".to_string()]);
        assert_eq!(
            ctx.buckets.cleanup,
            vec!["e1.removeEventListener(\"click\", _h0_click);".to_string()]
        );
    }
}
