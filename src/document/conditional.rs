//! Conditional group entity — an `if`/`elif*`/`else?` chain of sibling
//! elements rendered mutually exclusively.

use serde::{Deserialize, Serialize};

use crate::ids::{ElementId, GroupId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalGroup {
    #[serde(rename = "if")]
    pub if_: ElementId,
    pub elif: Vec<ElementId>,
    #[serde(rename = "else")]
    pub else_: Option<ElementId>,
}

impl ConditionalGroup {
    pub fn new(if_element: ElementId) -> Self {
        Self {
            if_: if_element,
            elif: Vec::new(),
            else_: None,
        }
    }

    /// All member elements in render order: `if`, then `elif`s in
    /// declaration order, then `else` if present.
    pub fn members(&self) -> impl Iterator<Item = &ElementId> {
        std::iter::once(&self.if_)
            .chain(self.elif.iter())
            .chain(self.else_.iter())
    }
}
