//! Element-tree emission: the recursive walk that builds `_create()`.

use crate::document::Element;
use crate::error::CompileError;
use crate::ids::ElementId;

use super::super::util::json_string;
use super::Context;

/// Builds the top-level `_create()` function from the document root and
/// pushes it into the functions bucket.
pub(crate) fn emit_tree(ctx: &mut Context) -> Result<(), CompileError> {
    let Some(root) = ctx.doc.elements.root_id.clone() else {
        return Err(CompileError::MissingRoot);
    };
    let mut body = Vec::new();
    let holder = gen_element(ctx, &root, &mut body)?;
    body.push(format!("return {holder};"));
    ctx.buckets
        .functions
        .push(format!("function _create() {{\n{}\n}}", indent(&body)));
    Ok(())
}

/// Emits the creation statements for `id` and its descendants, appending
/// them to `body`, and returns the holder name now bound to the created
/// node. Shared by the top-level tree walk, loop-body generation
/// ([`super::loops`]) and conditional-branch generation
/// ([`super::conditionals`]) — every place an element is built reuses
/// this one path.
pub(crate) fn gen_element(ctx: &mut Context, id: &ElementId, body: &mut Vec<String>) -> Result<String, CompileError> {
    let element = ctx
        .doc
        .elements
        .get(id)
        .ok_or_else(|| CompileError::DanglingChild(id.clone()))?
        .clone();
    let holder = ctx.namer.element_holder(id);
    if ctx.declared.insert(holder.clone()) {
        ctx.buckets.declarations.push(format!("let {holder};"));
    }
    gen_into(ctx, &element, &holder, body)?;
    Ok(holder)
}

fn gen_into(ctx: &mut Context, element: &Element, holder: &str, body: &mut Vec<String>) -> Result<(), CompileError> {
    body.push(format!("{holder} = document.createElement({});", json_string(&element.tag)));

    if let Some(text) = &element.text {
        body.push(format!("{holder}.textContent = {};", json_string(text)));
    }
    for (key, value) in &element.styles {
        let prop = super::super::naming::camel_case(key);
        body.push(format!("{holder}.style.{prop} = {};", json_string(value)));
    }
    for class in &element.classes {
        body.push(format!("{holder}.classList.add({});", json_string(class)));
    }
    for (key, value) in &element.attrs {
        body.push(format!(
            "{holder}.setAttribute({}, {});",
            json_string(key),
            json_string(value)
        ));
    }

    for child_id in &element.children {
        let child = ctx
            .doc
            .elements
            .get(child_id)
            .ok_or_else(|| CompileError::DanglingChild(child_id.clone()))?;

        if let Some(control) = &child.control {
            let group = ctx
                .doc
                .conditional_groups
                .get(&control.group)
                .ok_or_else(|| CompileError::GroupMissingIf(control.group.clone()))?;
            // Only the `if` member triggers emission; `elif`/`else` members
            // are mounted by the same group and are skipped here.
            if &group.if_ == child_id {
                super::conditionals::gen_anchor_and_mount(ctx, &control.group, holder, body)?;
            }
            continue;
        }

        if child.loop_.is_some() {
            super::loops::gen_mount(ctx, child_id, holder, body)?;
            continue;
        }

        let child_holder = gen_element(ctx, child_id, body)?;
        body.push(format!("{holder}.appendChild({child_holder});"));
    }

    Ok(())
}

fn indent(lines: &[String]) -> String {
    super::super::util::indent(lines)
}

#[cfg(test)]
mod tests {
    use crate::compiler::deps;
    use crate::document::{Document, Element};
    use crate::ids::ElementId;

    use super::*;

    #[test]
    fn plain_element_emits_tag_text_and_children() {
        let mut doc = Document::new(0);
        let root_id = ElementId::mint(1, 0);
        let child_id = ElementId::mint(2, 0);

        let mut root = Element::new(root_id.clone(), "layout", "div");
        root.children.push(child_id.clone());
        doc.elements.nodes.insert(root_id.clone(), root);

        let mut child = Element::new(child_id.clone(), "text", "span");
        child.text = Some("Hi".to_string());
        child.parent = Some(root_id.clone());
        doc.elements.nodes.insert(child_id.clone(), child);

        doc.elements.root_id = Some(root_id.clone());

        let deps = deps::analyze(&doc);
        let mut ctx = Context::new(&doc, &deps);
        emit_tree(&mut ctx).unwrap();

        let src = ctx.buckets.functions.join("\n");
        assert!(src.contains("document.createElement(\"div\")"));
        assert!(src.contains("document.createElement(\"span\")"));
        assert!(src.contains(".textContent = \"Hi\";"));
        assert!(src.contains(".appendChild("));
        assert!(ctx.buckets.declarations.iter().any(|d| d == "let e1;"));
        assert!(ctx.buckets.declarations.iter().any(|d| d == "let e2;"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let doc = Document::new(0);
        let deps = deps::analyze(&doc);
        let mut ctx = Context::new(&doc, &deps);
        assert_eq!(emit_tree(&mut ctx), Err(CompileError::MissingRoot));
    }

    #[test]
    fn dangling_child_is_an_error() {
        let mut doc = Document::new(0);
        let root_id = ElementId::mint(1, 0);
        let mut root = Element::new(root_id.clone(), "layout", "div");
        root.children.push(ElementId::mint(99, 0));
        doc.elements.nodes.insert(root_id.clone(), root);
        doc.elements.root_id = Some(root_id);

        let deps = deps::analyze(&doc);
        let mut ctx = Context::new(&doc, &deps);
        assert!(matches!(emit_tree(&mut ctx), Err(CompileError::DanglingChild(_))));
    }
}
