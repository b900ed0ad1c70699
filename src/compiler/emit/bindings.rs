//! Binding emission: one `_u_<name>()` per bound variable, grouping
//! every binding pointed at it.

use indexmap::IndexMap;

use crate::document::BindingKind;
use crate::error::CompileError;

use super::super::util::{indent, json_string};
use super::Context;

pub(crate) fn emit_all(ctx: &mut Context) -> Result<(), CompileError> {
    let mut by_variable: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (i, binding) in ctx.doc.bindings.iter().enumerate() {
        by_variable.entry(binding.variable.clone()).or_default().push(i);
    }

    for (name, indices) in by_variable {
        if ctx.doc.variables.get(&name).is_none() {
            return Err(CompileError::BindingUnknownVariable(name));
        }
        let mut stmts = Vec::new();
        for i in indices {
            let binding = &ctx.doc.bindings[i];
            let holder = ctx
                .namer
                .existing_holder(&binding.element_id)
                .ok_or_else(|| CompileError::BindingUnknownElement(binding.element_id.clone()))?
                .to_string();
            let access = ctx.access(&name);
            let stmt = match binding.kind {
                BindingKind::Text => format!("{holder}.textContent = {access};"),
                BindingKind::Attr => {
                    let key = binding.key.clone().unwrap_or_default();
                    format!("{holder}.setAttribute({}, {access});", json_string(&key))
                }
                BindingKind::Style => {
                    let key = binding.key.clone().unwrap_or_default();
                    let prop = super::super::naming::camel_case(&key);
                    format!("{holder}.style.{prop} = {access};")
                }
            };
            stmts.push(format!("if ({holder}) {{ {stmt} }}"));
        }
        ctx.buckets
            .functions
            .push(format!("function _u_{name}() {{\n{}\n}}", indent(&stmts)));
        ctx.buckets.lifecycle.push(format!("_u_{name}();"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::compiler::deps;
    use crate::compiler::emit::elements;
    use crate::document::{Binding, BindingKind, Document, Element, VariableType};
    use crate::ids::{BindingId, ElementId};
    use crate::value::Value;

    use super::*;

    fn doc_with_text_binding() -> Document {
        let mut doc = Document::new(0);
        doc.variables.insert(crate::document::Variable::new(
            crate::ids::VariableId::mint(1, 0),
            "label",
            VariableType::Reactive,
            Value::string("Hi"),
        ));
        let root_id = ElementId::mint(2, 0);
        let mut root = Element::new(root_id.clone(), "text", "span");
        root.text_binding = Some("label".to_string());
        doc.elements.nodes.insert(root_id.clone(), root);
        doc.elements.root_id = Some(root_id.clone());
        doc.bindings.push(Binding {
            id: BindingId::mint(1, 0),
            element_id: root_id,
            variable: "label".to_string(),
            kind: BindingKind::Text,
            key: None,
        });
        doc
    }

    #[test]
    fn text_binding_emits_guarded_assignment() {
        let doc = doc_with_text_binding();
        let deps = deps::analyze(&doc);
        let mut ctx = Context::new(&doc, &deps);
        elements::emit_tree(&mut ctx).unwrap();
        emit_all(&mut ctx).unwrap();

        let src = ctx.buckets.functions.join("\n");
        assert!(src.contains("function _u_label() {"));
        assert!(src.contains("if (e2) { e2.textContent = label.value; }"));
        assert_eq!(ctx.buckets.lifecycle, vec!["_u_label();".to_string()]);
    }

    #[test]
    fn binding_to_an_unmounted_element_is_an_error() {
        let doc = doc_with_text_binding();
        let deps = deps::analyze(&doc);
        let mut ctx = Context::new(&doc, &deps);
        assert!(matches!(emit_all(&mut ctx), Err(CompileError::BindingUnknownElement(_))));
    }
}
