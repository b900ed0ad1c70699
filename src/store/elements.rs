//! Element mutators.

use crate::document::{Element, ElementSpec};
use crate::error::StoreError;
use crate::ids::ElementId;

use super::Store;

impl Store {
    /// Allocates a new element, optionally appending to `parent`. If no
    /// parent is given and no root exists yet, the new element becomes
    /// the root.
    pub fn create(&mut self, spec: ElementSpec) -> Result<ElementId, StoreError> {
        self.require_tx()?;
        let id = self.mint_element();
        let mut element = Element::new(id.clone(), spec.kind, spec.tag);
        element.text = spec.text;

        match spec.parent {
            Some(parent_id) => {
                if !self.document.elements.nodes.contains_key(&parent_id) {
                    return Err(StoreError::UnknownElement(parent_id));
                }
                element.parent = Some(parent_id.clone());
                self.document.elements.nodes.insert(id.clone(), element);
                let parent = self.document.elements.nodes.get_mut(&parent_id).expect("checked above");
                parent.children.push(id.clone());
            }
            None => {
                self.document.elements.nodes.insert(id.clone(), element);
                if self.document.elements.root_id.is_none() {
                    self.document.elements.root_id = Some(id.clone());
                }
            }
        }

        self.document.dirty.mark_element(id.clone());
        self.document.dirty.mark_structure();
        Ok(id)
    }

    /// Detaches `child` from its previous parent (if any) and appends
    /// it to `parent`'s children.
    pub fn append(&mut self, parent: &ElementId, child: &ElementId) -> Result<(), StoreError> {
        self.require_tx()?;
        self.detach_from_current_parent(child)?;
        if !self.document.elements.nodes.contains_key(parent) {
            return Err(StoreError::UnknownElement(parent.clone()));
        }
        self.document
            .elements
            .nodes
            .get_mut(child)
            .ok_or_else(|| StoreError::UnknownElement(child.clone()))?
            .parent = Some(parent.clone());
        self.document
            .elements
            .nodes
            .get_mut(parent)
            .expect("checked above")
            .children
            .push(child.clone());
        self.document.dirty.mark_element(child.clone());
        self.document.dirty.mark_structure();
        Ok(())
    }

    /// As [`Store::append`] but inserts `child` at a specific index in
    /// `parent`'s children.
    pub fn insert(&mut self, parent: &ElementId, child: &ElementId, index: usize) -> Result<(), StoreError> {
        self.require_tx()?;
        self.detach_from_current_parent(child)?;
        if !self.document.elements.nodes.contains_key(parent) {
            return Err(StoreError::UnknownElement(parent.clone()));
        }
        self.document
            .elements
            .nodes
            .get_mut(child)
            .ok_or_else(|| StoreError::UnknownElement(child.clone()))?
            .parent = Some(parent.clone());
        let parent_node = self.document.elements.nodes.get_mut(parent).expect("checked above");
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, child.clone());
        self.document.dirty.mark_element(child.clone());
        self.document.dirty.mark_structure();
        Ok(())
    }

    fn detach_from_current_parent(&mut self, child: &ElementId) -> Result<(), StoreError> {
        let current_parent = self
            .document
            .elements
            .nodes
            .get(child)
            .ok_or_else(|| StoreError::UnknownElement(child.clone()))?
            .parent
            .clone();
        if let Some(parent_id) = current_parent
            && let Some(parent) = self.document.elements.nodes.get_mut(&parent_id)
        {
            parent.children.retain(|c| c != child);
        }
        Ok(())
    }

    /// Cascading delete: recurses over children first, detaches from
    /// parent, removes events/bindings/conditional-group membership
    /// referring to any deleted element, then unlinks.
    pub fn delete(&mut self, id: &ElementId) -> Result<(), StoreError> {
        self.require_tx()?;
        if !self.document.elements.nodes.contains_key(id) {
            return Err(StoreError::UnknownElement(id.clone()));
        }

        let subtree = self.document.elements.subtree(id);

        // Dissolve conditional groups for any `if` in the subtree, and
        // scrub membership for any surviving-but-doomed elif/else (they
        // are about to be deleted too, so this is just bookkeeping).
        let groups_to_dissolve: Vec<_> = self
            .document
            .conditional_groups
            .iter()
            .filter(|(_, g)| subtree.contains(&g.if_))
            .map(|(gid, _)| gid.clone())
            .collect();
        for gid in groups_to_dissolve {
            self.document.conditional_groups.shift_remove(&gid);
        }

        let subtree_set: std::collections::HashSet<_> = subtree.iter().cloned().collect();

        for events in self.document.events.values_mut() {
            events.retain(|e| !subtree_set.contains(&e.target));
        }
        self.document.bindings.retain(|b| !subtree_set.contains(&b.element_id));

        if let Some(parent_id) = self.document.elements.nodes.get(id).and_then(|e| e.parent.clone())
            && let Some(parent) = self.document.elements.nodes.get_mut(&parent_id)
        {
            parent.children.retain(|c| c != id);
        }

        for el_id in &subtree {
            self.document.elements.nodes.shift_remove(el_id);
        }

        if self.document.elements.root_id.as_ref() == Some(id) {
            self.document.elements.root_id = None;
        }

        self.document.dirty.mark_structure();
        Ok(())
    }

    /// Sets static text. Cannot coexist with a text binding.
    pub fn set_text(&mut self, id: &ElementId, text: Option<String>) -> Result<(), StoreError> {
        self.require_tx()?;
        let element = self
            .document
            .elements
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownElement(id.clone()))?;
        if text.is_some() && element.text_binding.is_some() {
            return Err(StoreError::TextAlreadyBound(id.clone()));
        }
        element.text = text;
        self.document.dirty.mark_element(id.clone());
        Ok(())
    }

    /// Adds or removes a style property. `None` removes the key.
    pub fn style(&mut self, id: &ElementId, key: &str, value: Option<String>) -> Result<(), StoreError> {
        self.require_tx()?;
        let element = self
            .document
            .elements
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownElement(id.clone()))?;
        match value {
            Some(v) => {
                element.styles.insert(key.to_string(), v);
            }
            None => {
                element.styles.shift_remove(key);
            }
        }
        self.document.dirty.mark_element(id.clone());
        Ok(())
    }

    /// Adds or removes a class.
    pub fn class(&mut self, id: &ElementId, name: &str, present: bool) -> Result<(), StoreError> {
        self.require_tx()?;
        let element = self
            .document
            .elements
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownElement(id.clone()))?;
        if present {
            element.classes.insert(name.to_string());
        } else {
            element.classes.shift_remove(name);
        }
        self.document.dirty.mark_element(id.clone());
        Ok(())
    }

    /// Adds or removes an attribute. `None` removes the key.
    pub fn attr(&mut self, id: &ElementId, key: &str, value: Option<String>) -> Result<(), StoreError> {
        self.require_tx()?;
        let element = self
            .document
            .elements
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownElement(id.clone()))?;
        match value {
            Some(v) => {
                element.attrs.insert(key.to_string(), v);
            }
            None => {
                element.attrs.shift_remove(key);
            }
        }
        self.document.dirty.mark_element(id.clone());
        Ok(())
    }
}
