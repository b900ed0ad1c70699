//! Element entity.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::ids::{ElementId, GroupId, VariableName};

/// An opaque tag naming what kind of widget an element is (`layout`,
/// `text`, `button`, ...). The emitted HTML tag is carried separately in
/// [`Element::tag`] so the same `kind` can back different tags.
pub type ElementKind = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlType {
    If,
    Elif,
    /// `elsif` is an accepted alias for `elif` at the data-model level;
    /// the store and compiler only ever produce/consume
    /// [`ControlType::Elif`].
    Elsif,
    Else,
}

/// Conditional-branch membership stamped on an element by the
/// `createIfGroup`/`addElif`/`addElse` store operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    #[serde(rename = "type")]
    pub control_type: ControlType,
    /// Non-empty for `if`/`elif`, absent for `else`.
    pub expr: Option<String>,
    pub group: GroupId,
}

/// Loop descriptor attached to an element that repeats once per item of
/// an array-valued variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopDescriptor {
    pub source: VariableName,
    pub alias: String,
    pub index: Option<String>,
    pub key: Option<String>,
}

/// A node in the UI tree that becomes a DOM node in generated output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub tag: String,

    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,

    pub text: Option<String>,
    pub text_binding: Option<VariableName>,

    pub styles: IndexMap<String, String>,
    pub classes: IndexSet<String>,
    pub attrs: IndexMap<String, String>,

    pub control: Option<Control>,
    #[serde(rename = "loop")]
    pub loop_: Option<LoopDescriptor>,
}

impl Element {
    pub fn new(id: ElementId, kind: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            tag: tag.into(),
            parent: None,
            children: Vec::new(),
            text: None,
            text_binding: None,
            styles: IndexMap::new(),
            classes: IndexSet::new(),
            attrs: IndexMap::new(),
            control: None,
            loop_: None,
        }
    }
}

/// Specification passed to `Store::create`.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    pub kind: ElementKind,
    pub tag: String,
    pub parent: Option<ElementId>,
    pub text: Option<String>,
}
