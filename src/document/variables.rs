//! The three variable partitions and cross-partition name lookup.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ids::VariableName;

use super::variable::{Variable, VariableType};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variables {
    #[serde(rename = "static")]
    pub static_: IndexMap<VariableName, Variable>,
    pub reactive: IndexMap<VariableName, Variable>,
    pub fetch: IndexMap<VariableName, Variable>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    fn partition_mut(&mut self, var_type: VariableType) -> &mut IndexMap<VariableName, Variable> {
        match var_type {
            VariableType::Static => &mut self.static_,
            VariableType::Reactive => &mut self.reactive,
            VariableType::Fetch => &mut self.fetch,
        }
    }

    /// `true` if any partition already has this name.
    pub fn name_exists(&self, name: &str) -> bool {
        self.static_.contains_key(name) || self.reactive.contains_key(name) || self.fetch.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.static_
            .get(name)
            .or_else(|| self.reactive.get(name))
            .or_else(|| self.fetch.get(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        if self.static_.contains_key(name) {
            self.static_.get_mut(name)
        } else if self.reactive.contains_key(name) {
            self.reactive.get_mut(name)
        } else {
            self.fetch.get_mut(name)
        }
    }

    pub fn insert(&mut self, variable: Variable) {
        let var_type = variable.var_type;
        self.partition_mut(var_type).insert(variable.name.clone(), variable);
    }

    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        if let Some(v) = self.static_.shift_remove(name) {
            return Some(v);
        }
        if let Some(v) = self.reactive.shift_remove(name) {
            return Some(v);
        }
        self.fetch.shift_remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.static_
            .values()
            .chain(self.reactive.values())
            .chain(self.fetch.values())
    }
}
