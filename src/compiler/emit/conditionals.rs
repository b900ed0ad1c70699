//! Conditional-group emission: a `_create<gid>()`/`_update<gid>()` pair
//! per group, mounted next to an anchor comment node.

use crate::document::ControlType;
use crate::error::CompileError;
use crate::ids::GroupId;

use super::super::graph::Graph;
use super::super::util::{indent, json_string};
use super::Context;

/// Emits the statements, at the group's position in its parent's
/// children, that plant the anchor and mount the initial branch.
/// Called once, at the `if` member's position in the tree walk.
pub(crate) fn gen_anchor_and_mount(
    ctx: &mut Context,
    group_id: &GroupId,
    parent_holder: &str,
    body: &mut Vec<String>,
) -> Result<(), CompileError> {
    let anchor = format!("_a{group_id}");
    let current = format!("_c{group_id}");
    if ctx.declared.insert(anchor.clone()) {
        ctx.buckets.declarations.push(format!("let {anchor}, {current};"));
    }
    body.push(format!(
        "{anchor} = document.createComment({});",
        json_string(&format!("a{group_id}"))
    ));
    body.push(format!("{parent_holder}.appendChild({anchor});"));
    body.push(format!("{current} = _create{group_id}();"));
    body.push(format!(
        "if ({current}) {{ {parent_holder}.insertBefore({current}, {anchor}); }}"
    ));
    Ok(())
}

pub(crate) fn emit_all(ctx: &mut Context, graph: &Graph) -> Result<(), CompileError> {
    for group_id in graph.conditionals.clone() {
        emit_group(ctx, &group_id)?;
    }
    Ok(())
}

fn emit_group(ctx: &mut Context, group_id: &GroupId) -> Result<(), CompileError> {
    let group = ctx
        .doc
        .conditional_groups
        .get(group_id)
        .ok_or_else(|| CompileError::GroupMissingIf(group_id.clone()))?
        .clone();

    let parent = ctx
        .doc
        .elements
        .get(&group.if_)
        .ok_or_else(|| CompileError::GroupMissingIf(group_id.clone()))?
        .parent
        .clone();

    let mut has_else = false;
    let mut create_body = Vec::new();
    let members: Vec<_> = group.members().cloned().collect();

    for (i, member_id) in members.iter().enumerate() {
        let element = ctx
            .doc
            .elements
            .get(member_id)
            .ok_or_else(|| CompileError::GroupMissingIf(group_id.clone()))?;
        if element.parent != parent {
            return Err(CompileError::GroupSiblingViolation(group_id.clone()));
        }
        let control = element
            .control
            .clone()
            .ok_or_else(|| CompileError::GroupMissingIf(group_id.clone()))?;

        let mut branch_body = Vec::new();
        let holder = super::elements::gen_element(ctx, member_id, &mut branch_body)?;

        let is_else = control.control_type == ControlType::Else;
        let keyword = if is_else {
            has_else = true;
            "else".to_string()
        } else if i == 0 {
            let expr = control.expr.ok_or_else(|| CompileError::GroupMissingIf(group_id.clone()))?;
            format!("if ({expr})")
        } else {
            let expr = control.expr.ok_or_else(|| CompileError::GroupMissingIf(group_id.clone()))?;
            format!("else if ({expr})")
        };

        create_body.push(format!("{keyword} {{"));
        create_body.extend(branch_body);
        create_body.push(format!("  return {holder};"));
        create_body.push("}".to_string());
    }
    if !has_else {
        create_body.push("return null;".to_string());
    }

    ctx.buckets.functions.push(format!(
        "function _create{group_id}() {{\n{}\n}}",
        indent(&create_body)
    ));

    let anchor = format!("_a{group_id}");
    let current = format!("_c{group_id}");
    ctx.buckets.functions.push(format!(
        "// Not invoked by any variable setter: wiring automatic recompute\n\
         // on a dependency change is left to a future redesign.\n\
         function _update{group_id}() {{\n  \
             if ({current}) {{ {current}.remove(); }}\n  \
             {current} = _create{group_id}();\n  \
             if ({current}) {{ {anchor}.parentNode.insertBefore({current}, {anchor}); }}\n\
         }}"
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::compiler::deps;
    use crate::document::{ElementSpec, VariableSpec, VariableType};
    use crate::store::Store;
    use crate::value::Value;

    use super::*;

    #[test]
    fn create_function_chains_if_elif_else() {
        let mut store = Store::new();
        store
            .tx("setup", |s| {
                let root = s.create(ElementSpec {
                    kind: "layout".into(),
                    tag: "div".into(),
                    parent: None,
                    text: None,
                })?;
                s.var(VariableSpec::new("flag", VariableType::Reactive, Value::Bool(true)))?;
                let (group, _if_id) = s.create_if_group(
                    &root,
                    "flag.value",
                    ElementSpec {
                        kind: "text".into(),
                        tag: "p".into(),
                        parent: None,
                        text: Some("Yes".into()),
                    },
                )?;
                s.add_else(
                    &group,
                    ElementSpec {
                        kind: "text".into(),
                        tag: "p".into(),
                        parent: None,
                        text: Some("No".into()),
                    },
                )?;
                Ok(())
            })
            .unwrap();

        let frozen = store.get_ir();
        let doc = frozen.get();
        let deps = deps::analyze(doc);
        let graph = Graph::build(doc);
        let mut ctx = Context::new(doc, &deps);
        emit_all(&mut ctx, &graph).unwrap();

        let src = ctx.buckets.functions.join("\n");
        assert!(src.contains("if (flag.value) {"));
        assert!(src.contains("else {"));
        assert!(src.contains("function _update"));
        assert!(!src.contains("return null;"));
    }
}
