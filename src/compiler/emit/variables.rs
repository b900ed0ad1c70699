//! Variable emission: static/reactive/fetch into the state bucket.

use crate::document::VariableType;

use super::Context;

pub(crate) fn emit_all(ctx: &mut Context) {
    let names: Vec<_> = ctx.doc.variables.iter().map(|v| v.name.clone()).collect();
    for name in names {
        let Some(variable) = ctx.doc.variables.get(&name) else { continue };
        let init = variable.init.emit();
        match variable.var_type {
            VariableType::Static => {
                ctx.buckets.state.push(format!("let {name} = {init};"));
            }
            VariableType::Reactive => {
                let update_call = if ctx.has_binding(&name) {
                    format!(" _u_{name}();")
                } else {
                    String::new()
                };
                ctx.buckets.state.push(format!(
                    "let _{name} = {init};\n\
                     const {name} = {{\n  \
                         get value() {{ return _{name}; }},\n  \
                         set value(v) {{ if (_{name} !== v) {{ _{name} = v;{update_call} }} }}\n\
                     }};"
                ));
            }
            VariableType::Fetch => {
                ctx.buckets.state.push(format!(
                    "let _{name} = {init};\n\
                     let _{name}_loading = true;\n\
                     let _{name}_error = null;\n\
                     // Fetch invocation is never emitted; `source`/`lifecycle`\n\
                     // are carried on the IR for a future compiler pass.\n\
                     const {name} = {{\n  \
                         get value() {{ return _{name}; }},\n  \
                         get loading() {{ return _{name}_loading; }},\n  \
                         get error() {{ return _{name}_error; }}\n\
                     }};"
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::compiler::deps;
    use crate::document::{Document, VariableSpec};
    use crate::value::Value;

    use super::*;

    fn doc_with(spec: VariableSpec) -> Document {
        let mut doc = Document::new(0);
        doc.variables.insert(crate::document::Variable {
            id: crate::ids::VariableId::mint(1, 0),
            name: spec.name,
            var_type: spec.var_type,
            init: spec.init,
            source: spec.source,
            lifecycle: spec.lifecycle,
        });
        doc
    }

    #[test]
    fn static_variable_emits_a_plain_binding() {
        let doc = doc_with(VariableSpec::new("label", VariableType::Static, Value::string("Hi")));
        let deps = deps::analyze(&doc);
        let mut ctx = Context::new(&doc, &deps);
        emit_all(&mut ctx);
        assert_eq!(ctx.buckets.state, vec![r#"let label = "Hi";"#.to_string()]);
    }

    #[test]
    fn reactive_variable_without_subscribers_skips_the_update_call() {
        let doc = doc_with(VariableSpec::new("count", VariableType::Reactive, Value::number(0.0)));
        let deps = deps::analyze(&doc);
        let mut ctx = Context::new(&doc, &deps);
        emit_all(&mut ctx);
        assert!(ctx.buckets.state[0].contains("if (_count !== v) { _count = v; }"));
    }

    #[test]
    fn reactive_variable_with_a_binding_invokes_its_update_function() {
        let mut doc = doc_with(VariableSpec::new("count", VariableType::Reactive, Value::number(0.0)));
        doc.bindings.push(crate::document::Binding {
            id: crate::ids::BindingId::mint(1, 0),
            element_id: crate::ids::ElementId::mint(1, 0),
            variable: "count".to_string(),
            kind: crate::document::BindingKind::Text,
            key: None,
        });
        let deps = deps::analyze(&doc);
        let mut ctx = Context::new(&doc, &deps);
        emit_all(&mut ctx);
        assert!(ctx.buckets.state[0].contains("_count = v; _u_count();"));
    }

    #[test]
    fn reactive_variable_with_only_a_non_binding_subscriber_skips_the_update_call() {
        let doc = doc_with(VariableSpec::new("count", VariableType::Reactive, Value::number(0.0)));
        let mut deps = deps::analyze(&doc);
        // An event target or loop source counts as a subscriber but never
        // gets an `_u_count()` function generated for it.
        deps.get_mut("count").unwrap().subs.insert("e1".to_string());
        assert!(!deps.get("count").unwrap().subs.is_empty());
        let mut ctx = Context::new(&doc, &deps);
        emit_all(&mut ctx);
        assert!(ctx.buckets.state[0].contains("if (_count !== v) { _count = v; }"));
    }

    #[test]
    fn fetch_variable_emits_loading_and_error_fields() {
        let doc = doc_with(VariableSpec::new("users", VariableType::Fetch, Value::Array(Vec::new())));
        let deps = deps::analyze(&doc);
        let mut ctx = Context::new(&doc, &deps);
        emit_all(&mut ctx);
        assert!(ctx.buckets.state[0].contains("_users_loading = true"));
        assert!(ctx.buckets.state[0].contains("_users_error = null"));
    }
}
