//! Small text-assembly helpers shared across emission stages.

/// Indents every line by two spaces, the brace-body convention used
/// throughout the generated functions.
pub(crate) fn indent(lines: &[String]) -> String {
    lines.iter().map(|line| format!("  {line}")).collect::<Vec<_>>().join("\n")
}

/// JSON-quotes a string for embedding as a JS string literal.
pub(crate) fn json_string(s: &str) -> String {
    serde_json::to_string(s).expect("string serialization is infallible")
}
