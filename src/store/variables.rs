//! Variable mutators.

use crate::document::{Variable, VariableSpec, VariableType};
use crate::error::StoreError;
use crate::ids::VariableName;
use crate::value::Value;

use super::Store;

impl Store {
    /// Declares a new variable, rejecting duplicate names across all
    /// three partitions.
    pub fn var(&mut self, spec: VariableSpec) -> Result<VariableName, StoreError> {
        self.require_tx()?;
        if self.document.variables.name_exists(&spec.name) {
            return Err(StoreError::DuplicateVariableName(spec.name));
        }
        let id = self.mint_variable();
        let name = spec.name.clone();
        let mut variable = Variable::new(id.clone(), spec.name, spec.var_type, spec.init);
        variable.source = spec.source;
        variable.lifecycle = spec.lifecycle;
        self.document.variables.insert(variable);
        self.document.dirty.mark_variable(id);
        Ok(name)
    }

    /// Updates a variable's current value. Rejects `static` variables.
    pub fn update_var(&mut self, name: &str, value: Value) -> Result<(), StoreError> {
        self.require_tx()?;
        let variable = self
            .document
            .variables
            .get_mut(name)
            .ok_or_else(|| StoreError::UnknownVariable(name.to_string()))?;
        if variable.var_type == VariableType::Static {
            return Err(StoreError::StaticVariableUpdate(name.to_string()));
        }
        let id = variable.id.clone();
        variable.init = value;
        self.document.dirty.mark_variable(id);
        Ok(())
    }

    /// Deletes a variable, cascading to every binding that references it.
    pub fn delete_var(&mut self, name: &str) -> Result<(), StoreError> {
        self.require_tx()?;
        let variable = self
            .document
            .variables
            .remove(name)
            .ok_or_else(|| StoreError::UnknownVariable(name.to_string()))?;

        for element in self.document.elements.nodes.values_mut() {
            if element.text_binding.as_deref() == Some(name) {
                element.text_binding = None;
            }
        }
        self.document.bindings.retain(|b| b.variable != name);
        self.document.dirty.mark_structure();
        self.document.dirty.mark_variable(variable.id);
        Ok(())
    }

    pub fn get_var(&self, name: &str) -> Option<Variable> {
        self.document.variables.get(name).cloned()
    }

    pub fn vars(&self) -> Vec<Variable> {
        self.document.variables.iter().cloned().collect()
    }
}
