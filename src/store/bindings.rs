//! Binding mutators. `bind_attr`/`bind_style` generalize `bind_text`'s
//! discipline to the other two [`crate::document::BindingKind`]s.

use crate::document::{Binding, BindingKind};
use crate::error::StoreError;
use crate::ids::{BindingId, ElementId, VariableName};

use super::Store;

impl Store {
    fn require_variable(&self, name: &str) -> Result<(), StoreError> {
        if self.document.variables.name_exists(name) {
            Ok(())
        } else {
            Err(StoreError::UnknownVariable(name.to_string()))
        }
    }

    fn require_element(&self, id: &ElementId) -> Result<(), StoreError> {
        if self.document.elements.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(StoreError::UnknownElement(id.clone()))
        }
    }

    /// Binds an element's text to a variable. Fails if the element
    /// already has static text.
    pub fn bind_text(&mut self, id: &ElementId, variable: impl Into<VariableName>) -> Result<BindingId, StoreError> {
        self.require_tx()?;
        self.require_element(id)?;
        let variable = variable.into();
        self.require_variable(&variable)?;

        let element = self.document.elements.nodes.get(id).expect("checked above");
        if element.text.is_some() {
            return Err(StoreError::TextAlreadyStatic(id.clone()));
        }

        let binding_id = self.mint_binding();
        self.document.elements.nodes.get_mut(id).expect("checked above").text_binding = Some(variable.clone());
        self.document.bindings.push(Binding {
            id: binding_id.clone(),
            element_id: id.clone(),
            variable,
            kind: BindingKind::Text,
            key: None,
        });
        self.document.dirty.mark_element(id.clone());
        self.document.dirty.mark_binding(binding_id.clone());
        Ok(binding_id)
    }

    /// Removes an element's text binding, if any.
    pub fn unbind_text(&mut self, id: &ElementId) -> Result<(), StoreError> {
        self.require_tx()?;
        let element = self
            .document
            .elements
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownElement(id.clone()))?;
        element.text_binding = None;
        self.document
            .bindings
            .retain(|b| !(b.element_id == *id && b.kind == BindingKind::Text));
        self.document.dirty.mark_element(id.clone());
        Ok(())
    }

    /// Binds an attribute to a variable.
    pub fn bind_attr(
        &mut self,
        id: &ElementId,
        variable: impl Into<VariableName>,
        key: impl Into<String>,
    ) -> Result<BindingId, StoreError> {
        self.require_tx()?;
        self.require_element(id)?;
        let variable = variable.into();
        self.require_variable(&variable)?;
        let binding_id = self.mint_binding();
        self.document.bindings.push(Binding {
            id: binding_id.clone(),
            element_id: id.clone(),
            variable,
            kind: BindingKind::Attr,
            key: Some(key.into()),
        });
        self.document.dirty.mark_binding(binding_id.clone());
        Ok(binding_id)
    }

    /// Binds a style property to a variable.
    pub fn bind_style(
        &mut self,
        id: &ElementId,
        variable: impl Into<VariableName>,
        key: impl Into<String>,
    ) -> Result<BindingId, StoreError> {
        self.require_tx()?;
        self.require_element(id)?;
        let variable = variable.into();
        self.require_variable(&variable)?;
        let binding_id = self.mint_binding();
        self.document.bindings.push(Binding {
            id: binding_id.clone(),
            element_id: id.clone(),
            variable,
            kind: BindingKind::Style,
            key: Some(key.into()),
        });
        self.document.dirty.mark_binding(binding_id.clone());
        Ok(binding_id)
    }

    /// Removes a binding by id, regardless of kind.
    pub fn unbind(&mut self, binding_id: &BindingId) -> Result<(), StoreError> {
        self.require_tx()?;
        let before = self.document.bindings.len();
        let removed_text_element = self
            .document
            .bindings
            .iter()
            .find(|b| &b.id == binding_id && b.kind == BindingKind::Text)
            .map(|b| b.element_id.clone());
        self.document.bindings.retain(|b| &b.id != binding_id);
        if self.document.bindings.len() == before {
            return Ok(());
        }
        if let Some(element_id) = removed_text_element
            && let Some(element) = self.document.elements.nodes.get_mut(&element_id)
        {
            element.text_binding = None;
        }
        Ok(())
    }
}
