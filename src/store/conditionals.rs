//! Conditional-group mutators.

use crate::document::{ConditionalGroup, Control, ControlType, ElementSpec};
use crate::error::StoreError;
use crate::ids::{ElementId, GroupId};

use super::Store;

impl Store {
    /// Creates the `if` child element under `parent`, stamps its
    /// control metadata, and registers a new group.
    pub fn create_if_group(
        &mut self,
        parent: &ElementId,
        expr: impl Into<String>,
        element: ElementSpec,
    ) -> Result<(GroupId, ElementId), StoreError> {
        self.require_tx()?;
        let mut spec = element;
        spec.parent = Some(parent.clone());
        let element_id = self.create(spec)?;

        let group_id = self.mint_group();
        self.document
            .elements
            .nodes
            .get_mut(&element_id)
            .expect("just created")
            .control = Some(Control {
            control_type: ControlType::If,
            expr: Some(expr.into()),
            group: group_id.clone(),
        });
        self.document
            .conditional_groups
            .insert(group_id.clone(), ConditionalGroup::new(element_id.clone()));
        self.document.dirty.mark_conditional(group_id.clone());
        Ok((group_id, element_id))
    }

    /// Adds an `elif` sibling under the group's `if` element's parent.
    pub fn add_elif(
        &mut self,
        group_id: &GroupId,
        expr: impl Into<String>,
        element: ElementSpec,
    ) -> Result<ElementId, StoreError> {
        self.require_tx()?;
        let if_id = self
            .document
            .conditional_groups
            .get(group_id)
            .ok_or_else(|| StoreError::UnknownGroup(group_id.clone()))?
            .if_
            .clone();
        let parent = self
            .document
            .elements
            .nodes
            .get(&if_id)
            .ok_or_else(|| StoreError::UnknownElement(if_id.clone()))?
            .parent
            .clone()
            .ok_or_else(|| StoreError::UnknownElement(if_id.clone()))?;

        let mut spec = element;
        spec.parent = Some(parent);
        let element_id = self.create(spec)?;

        self.document
            .elements
            .nodes
            .get_mut(&element_id)
            .expect("just created")
            .control = Some(Control {
            control_type: ControlType::Elif,
            expr: Some(expr.into()),
            group: group_id.clone(),
        });
        self.document
            .conditional_groups
            .get_mut(group_id)
            .expect("checked above")
            .elif
            .push(element_id.clone());
        self.document.dirty.mark_conditional(group_id.clone());
        Ok(element_id)
    }

    /// Adds the `else` sibling, requiring no existing `else`.
    pub fn add_else(&mut self, group_id: &GroupId, element: ElementSpec) -> Result<ElementId, StoreError> {
        self.require_tx()?;
        {
            let group = self
                .document
                .conditional_groups
                .get(group_id)
                .ok_or_else(|| StoreError::UnknownGroup(group_id.clone()))?;
            if group.else_.is_some() {
                return Err(StoreError::DuplicateElse(group_id.clone()));
            }
        }
        let if_id = self.document.conditional_groups.get(group_id).expect("checked above").if_.clone();
        let parent = self
            .document
            .elements
            .nodes
            .get(&if_id)
            .ok_or_else(|| StoreError::UnknownElement(if_id.clone()))?
            .parent
            .clone()
            .ok_or_else(|| StoreError::UnknownElement(if_id.clone()))?;

        let mut spec = element;
        spec.parent = Some(parent);
        let element_id = self.create(spec)?;

        self.document
            .elements
            .nodes
            .get_mut(&element_id)
            .expect("just created")
            .control = Some(Control {
            control_type: ControlType::Else,
            expr: None,
            group: group_id.clone(),
        });
        self.document.conditional_groups.get_mut(group_id).expect("checked above").else_ = Some(element_id.clone());
        self.document.dirty.mark_conditional(group_id.clone());
        Ok(element_id)
    }

    /// Updates an `if`/`elif` element's expression. Fails for `else`.
    pub fn update_condition(&mut self, id: &ElementId, expr: impl Into<String>) -> Result<(), StoreError> {
        self.require_tx()?;
        let element = self
            .document
            .elements
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownElement(id.clone()))?;
        let control = element.control.as_mut().ok_or_else(|| StoreError::UnknownElement(id.clone()))?;
        if control.control_type == ControlType::Else {
            return Err(StoreError::ElseHasNoExpr(id.clone()));
        }
        control.expr = Some(expr.into());
        let group_id = control.group.clone();
        self.document.dirty.mark_conditional(group_id);
        self.document.dirty.mark_element(id.clone());
        Ok(())
    }

    /// Removes `id` from its group (dissolving the whole group if `id`
    /// is the `if`) and deletes the element.
    pub fn remove_conditional(&mut self, id: &ElementId) -> Result<(), StoreError> {
        self.require_tx()?;
        let group_id = self
            .document
            .elements
            .nodes
            .get(id)
            .ok_or_else(|| StoreError::UnknownElement(id.clone()))?
            .control
            .as_ref()
            .map(|c| c.group.clone());

        if let Some(group_id) = group_id {
            let is_if = self
                .document
                .conditional_groups
                .get(&group_id)
                .map(|g| &g.if_ == id)
                .unwrap_or(false);
            if is_if {
                if let Some(group) = self.document.conditional_groups.shift_remove(&group_id) {
                    for member in group.elif.iter().chain(group.else_.iter()) {
                        if let Some(sibling) = self.document.elements.nodes.get_mut(member) {
                            sibling.control = None;
                        }
                    }
                }
            } else if let Some(group) = self.document.conditional_groups.get_mut(&group_id) {
                group.elif.retain(|e| e != id);
                if group.else_.as_ref() == Some(id) {
                    group.else_ = None;
                }
            }
            self.document.dirty.mark_conditional(group_id);
        }

        self.delete(id)
    }

    /// Returns the list of shape violations (non-fatal, collected, never thrown).
    pub fn validate_conditional_groups(&self) -> Vec<super::Violation> {
        super::validate::check_conditional_groups(&self.document)
    }
}
