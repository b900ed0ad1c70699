//! Binding entity — a declarative link from a variable to an element's
//! text, attribute, or style.

use serde::{Deserialize, Serialize};

use crate::ids::{BindingId, ElementId, VariableName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    Text,
    Attr,
    Style,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub id: BindingId,
    pub element_id: ElementId,
    pub variable: VariableName,
    pub kind: BindingKind,
    /// Required for `attr`/`style`, must be `None` for `text`.
    pub key: Option<String>,
}
