//! Variable entity.

use serde::{Deserialize, Serialize};

use crate::ids::{VariableId, VariableName};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    Static,
    Reactive,
    Fetch,
}

/// `source`/`lifecycle` are only meaningful for [`VariableType::Fetch`].
/// They are retained through compilation but no fetch invocation is
/// emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub id: VariableId,
    pub name: VariableName,
    #[serde(rename = "type")]
    pub var_type: VariableType,
    pub init: Value,
    pub source: Option<String>,
    pub lifecycle: Option<String>,
}

impl Variable {
    pub fn new(id: VariableId, name: impl Into<String>, var_type: VariableType, init: Value) -> Self {
        Self {
            id,
            name: name.into(),
            var_type,
            init,
            source: None,
            lifecycle: None,
        }
    }
}

/// Specification passed to `Store::var`.
#[derive(Debug, Clone)]
pub struct VariableSpec {
    pub name: VariableName,
    pub var_type: VariableType,
    pub init: Value,
    pub source: Option<String>,
    pub lifecycle: Option<String>,
}

impl VariableSpec {
    pub fn new(name: impl Into<String>, var_type: VariableType, init: Value) -> Self {
        Self {
            name: name.into(),
            var_type,
            init,
            source: None,
            lifecycle: None,
        }
    }
}
