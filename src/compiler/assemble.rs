//! Joins the five emission buckets into the final `mount(target)` source.

use super::emit::Buckets;
use super::util::indent;

/// Assembly order: a timestamp comment, declarations, state, functions,
/// then a `mount(target)` closure that creates the tree, appends it,
/// runs every lifecycle statement, and returns a `{ destroy() }` handle.
pub(crate) fn assemble(buckets: &Buckets, timestamp: u64) -> String {
    let mut sections = Vec::new();
    sections.push(format!("// generated {timestamp}"));

    if !buckets.declarations.is_empty() {
        sections.push(buckets.declarations.join("\n"));
    }
    if !buckets.state.is_empty() {
        sections.push(buckets.state.join("\n\n"));
    }
    if !buckets.functions.is_empty() {
        sections.push(buckets.functions.join("\n\n"));
    }

    let mut destroy_body = buckets.cleanup.clone();
    destroy_body.push("root.remove();".to_string());
    let destroy_lines: Vec<String> = indent(&destroy_body).lines().map(str::to_string).collect();

    let mut mount_body = vec!["const root = _create();".to_string(), "target.appendChild(root);".to_string()];
    mount_body.extend(buckets.lifecycle.iter().cloned());
    mount_body.push("return {".to_string());
    mount_body.push("  destroy() {".to_string());
    mount_body.extend(destroy_lines);
    mount_body.push("  }".to_string());
    mount_body.push("};".to_string());

    sections.push(format!("export function mount(target) {{\n{}\n}}", indent(&mount_body)));

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_sections_in_order_and_wraps_mount() {
        let buckets = Buckets {
            declarations: vec!["let e1;".to_string()],
            state: vec!["let count = 0;".to_string()],
            functions: vec!["function _create() {\n  return e1;\n}".to_string()],
            lifecycle: vec!["_attach();".to_string()],
            cleanup: vec!["e1.removeEventListener(\"click\", _h0_click);".to_string()],
        };
        let src = assemble(&buckets, 1700000000);
        assert!(src.starts_with("// generated 1700000000"));
        assert!(src.contains("let e1;"));
        assert!(src.contains("let count = 0;"));
        assert!(src.contains("function _create()"));
        assert!(src.contains("export function mount(target) {"));
        assert!(src.contains("const root = _create();"));
        assert!(src.contains("_attach();"));
        assert!(src.contains("destroy() {"));
        assert!(src.contains("removeEventListener"));
        assert!(src.contains("root.remove();"));
    }

    #[test]
    fn empty_buckets_still_produce_a_working_mount() {
        let buckets = Buckets::default();
        let src = assemble(&buckets, 0);
        assert!(src.contains("export function mount(target) {"));
        assert!(src.contains("root.remove();"));
    }
}
