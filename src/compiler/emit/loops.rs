//! Loop emission: `_loop<n>()` builds a `DocumentFragment` from a
//! source array.

use crate::document::Element;
use crate::error::CompileError;
use crate::ids::ElementId;

use super::super::graph::Graph;
use super::super::util::{indent, json_string};
use super::Context;

/// Emits the statements, at the loop's position in its parent's
/// children, that mount the fragment: the holder is declared once and
/// assigned the result of `_loop<n>()` during `_create()`.
pub(crate) fn gen_mount(
    ctx: &mut Context,
    id: &ElementId,
    parent_holder: &str,
    body: &mut Vec<String>,
) -> Result<(), CompileError> {
    let holder = ctx.namer.element_holder(id);
    if ctx.declared.insert(holder.clone()) {
        ctx.buckets.declarations.push(format!("let {holder};"));
    }
    let fn_name = loop_fn_name(&holder);
    body.push(format!("{holder} = {fn_name}();"));
    body.push(format!("{parent_holder}.appendChild({holder});"));
    Ok(())
}

pub(crate) fn emit_all(ctx: &mut Context, graph: &Graph) -> Result<(), CompileError> {
    for id in graph.loops.clone() {
        emit_one(ctx, &id)?;
    }
    Ok(())
}

fn emit_one(ctx: &mut Context, id: &ElementId) -> Result<(), CompileError> {
    let element = ctx
        .doc
        .elements
        .get(id)
        .ok_or_else(|| CompileError::DanglingChild(id.clone()))?
        .clone();
    let desc = element.loop_.clone().expect("graph only lists looping elements");

    if ctx.doc.variables.get(&desc.source).is_none() {
        return Err(CompileError::LoopUnknownSource {
            element: id.clone(),
            source: desc.source.clone(),
        });
    }

    let holder = ctx.namer.element_holder(id);
    let fn_name = loop_fn_name(&holder);
    let params = match &desc.index {
        Some(idx) => format!("{}, {idx}", desc.alias),
        None => desc.alias.clone(),
    };

    let mut fn_body = vec![
        "const _frag = document.createDocumentFragment();".to_string(),
        format!("{}.value.forEach(({params}) => {{", desc.source),
    ];

    let mut counter = 0u64;
    let item_name = gen_local(ctx, &element, &mut fn_body, &mut counter)?;
    fn_body.push(format!("  _frag.appendChild({item_name});"));
    fn_body.push("});".to_string());
    fn_body.push("return _frag;".to_string());

    ctx.buckets
        .functions
        .push(format!("function {fn_name}() {{\n{}\n}}", indent(&fn_body)));
    Ok(())
}

/// Builds one loop-body instance with direct DOM calls and local,
/// per-iteration variable names (never module-level holders), reusing
/// the tag/text/styles/classes/attrs/children logic of the plain
/// element path.
fn gen_local(ctx: &Context, element: &Element, body: &mut Vec<String>, counter: &mut u64) -> Result<String, CompileError> {
    let name = format!("_c{counter}");
    *counter += 1;
    body.push(format!(
        "  const {name} = document.createElement({});",
        json_string(&element.tag)
    ));

    if let Some(var) = &element.text_binding {
        body.push(format!("  {name}.textContent = {var};"));
    } else if let Some(text) = &element.text {
        body.push(format!("  {name}.textContent = {};", json_string(text)));
    }
    for (key, value) in &element.styles {
        let prop = super::super::naming::camel_case(key);
        body.push(format!("  {name}.style.{prop} = {};", json_string(value)));
    }
    for class in &element.classes {
        body.push(format!("  {name}.classList.add({});", json_string(class)));
    }
    for (key, value) in &element.attrs {
        body.push(format!(
            "  {name}.setAttribute({}, {});",
            json_string(key),
            json_string(value)
        ));
    }

    for child_id in &element.children {
        let child = ctx
            .doc
            .elements
            .get(child_id)
            .ok_or_else(|| CompileError::DanglingChild(child_id.clone()))?
            .clone();
        let child_name = gen_local(ctx, &child, body, counter)?;
        body.push(format!("  {name}.appendChild({child_name});"));
    }

    Ok(name)
}

/// Derives `_loop<n>()`'s name from the holder already minted for this
/// element, so the mount site and the function definition always agree
/// without threading a separate positional index through both.
fn loop_fn_name(holder: &str) -> String {
    let suffix = holder.strip_prefix('e').unwrap_or(holder);
    format!("_loop{suffix}")
}

#[cfg(test)]
mod tests {
    use crate::compiler::deps;
    use crate::document::{Document, Element, LoopDescriptor, VariableType};
    use crate::ids::ElementId;
    use crate::value::Value;

    use super::*;

    fn doc_with_loop() -> (Document, ElementId) {
        let mut doc = Document::new(0);
        doc.variables.insert(crate::document::Variable::new(
            crate::ids::VariableId::mint(1, 0),
            "items",
            VariableType::Reactive,
            Value::Array(Vec::new()),
        ));

        let loop_id = ElementId::mint(2, 0);
        let mut loop_el = Element::new(loop_id.clone(), "text", "li");
        loop_el.text_binding = Some("item".to_string());
        loop_el.loop_ = Some(LoopDescriptor {
            source: "items".to_string(),
            alias: "item".to_string(),
            index: Some("i".to_string()),
            key: None,
        });
        doc.elements.nodes.insert(loop_id.clone(), loop_el);
        (doc, loop_id)
    }

    #[test]
    fn loop_function_iterates_source_and_returns_a_fragment() {
        let (doc, loop_id) = doc_with_loop();
        let deps = deps::analyze(&doc);
        let mut ctx = Context::new(&doc, &deps);
        emit_one(&mut ctx, &loop_id).unwrap();
        let src = ctx.buckets.functions.join("\n");
        assert!(src.contains("items.value.forEach((item, i) => {"));
        assert!(src.contains("createDocumentFragment()"));
        assert!(src.contains("textContent = item;"));
        assert!(src.contains("return _frag;"));
    }

    #[test]
    fn unknown_source_variable_is_an_error() {
        let (mut doc, loop_id) = doc_with_loop();
        doc.variables.remove("items");
        let deps = deps::analyze(&doc);
        let mut ctx = Context::new(&doc, &deps);
        assert!(matches!(
            emit_one(&mut ctx, &loop_id),
            Err(CompileError::LoopUnknownSource { .. })
        ));
    }
}
