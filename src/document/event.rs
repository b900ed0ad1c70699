//! Event entity — one collection per event type, each entry binding a
//! target element to an action.

use serde::{Deserialize, Serialize};

use crate::ids::{ElementId, EventId, VariableName};

/// The compound assignment operator of an `Update` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOp {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    AddAssign,
    #[serde(rename = "-=")]
    SubAssign,
    #[serde(rename = "*=")]
    MulAssign,
    #[serde(rename = "/=")]
    DivAssign,
}

impl UpdateOp {
    /// The JS operator token emitted between the target and value.
    pub fn token(self) -> &'static str {
        match self {
            UpdateOp::Assign => "=",
            UpdateOp::AddAssign => "+=",
            UpdateOp::SubAssign => "-=",
            UpdateOp::MulAssign => "*=",
            UpdateOp::DivAssign => "/=",
        }
    }
}

/// A tagged action an event handler performs: three recognised variants
/// plus an `Unknown` fallback the compiler emits as a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag")]
pub enum Action {
    /// `target op= value` (or `target = value` when `op` is `Assign`).
    Update {
        target: VariableName,
        op: UpdateOp,
        /// Raw JS expression text, embedded verbatim.
        value: String,
    },
    /// `target = value`.
    Set {
        target: VariableName,
        value: String,
    },
    /// `function()`.
    Call { function: String },
    /// Anything else the IR happened to carry; compiled as a no-op.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub target: ElementId,
    pub action: Action,
}

/// The event type a handler is attached to (`"click"`, `"input"`, ...).
/// Kept as an open string rather than an enum since the IR treats event
/// types as free-form labels, one collection per type.
pub type EventType = String;
