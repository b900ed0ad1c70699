//! Macro operations — composed of primitives, each run inside an
//! auto-opened transaction.

use std::collections::HashMap;

use crate::document::{BindingKind, ElementSpec};
use crate::error::StoreError;
use crate::ids::ElementId;

use super::Store;

impl Store {
    /// Deep-copies the subtree rooted at `id`, preserving visual fields,
    /// child order, bindings and events, but "unwiring" `control` and
    /// `loop` on the copy (§9 open question 4) so the duplicate does not
    /// silently join the original's conditional group or loop context.
    /// Inserted immediately after the original, sibling-wise.
    pub fn duplicate(&mut self, id: &ElementId) -> Result<ElementId, StoreError> {
        self.tx("duplicate", |s| s.duplicate_inner(id))
    }

    fn duplicate_inner(&mut self, id: &ElementId) -> Result<ElementId, StoreError> {
        let original = self
            .document
            .elements
            .nodes
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownElement(id.clone()))?;

        let mut id_map: HashMap<ElementId, ElementId> = HashMap::new();
        let new_root = self.clone_subtree(id, original.parent.clone(), &mut id_map)?;

        // Reposition the copy immediately after the original among its
        // siblings (append() puts it last; insert() places it precisely).
        if let Some(parent_id) = &original.parent {
            let index = self
                .document
                .elements
                .nodes
                .get(parent_id)
                .and_then(|p| p.children.iter().position(|c| c == id))
                .map(|i| i + 1)
                .unwrap_or(usize::MAX);
            self.insert(parent_id, &new_root, index)?;
        }

        // Clone bindings and events, remapped onto the new ids.
        let old_bindings: Vec<_> = self
            .document
            .bindings
            .iter()
            .filter(|b| id_map.contains_key(&b.element_id))
            .cloned()
            .collect();
        for binding in old_bindings {
            let new_element = id_map.get(&binding.element_id).expect("filtered above").clone();
            match binding.kind {
                BindingKind::Text => {
                    self.bind_text(&new_element, binding.variable)?;
                }
                BindingKind::Attr => {
                    self.bind_attr(&new_element, binding.variable, binding.key.unwrap_or_default())?;
                }
                BindingKind::Style => {
                    self.bind_style(&new_element, binding.variable, binding.key.unwrap_or_default())?;
                }
            }
        }

        let event_types: Vec<String> = self.document.events.keys().cloned().collect();
        for event_type in event_types {
            let matching: Vec<_> = self.document.events[&event_type]
                .iter()
                .filter(|e| id_map.contains_key(&e.target))
                .cloned()
                .collect();
            for event in matching {
                let new_target = id_map.get(&event.target).expect("filtered above").clone();
                let new_id = self.mint_event();
                self.document
                    .events
                    .entry(event_type.clone())
                    .or_default()
                    .push(crate::document::Event {
                        id: new_id,
                        target: new_target,
                        action: event.action,
                    });
            }
        }

        Ok(new_root)
    }

    fn clone_subtree(
        &mut self,
        id: &ElementId,
        parent: Option<ElementId>,
        id_map: &mut HashMap<ElementId, ElementId>,
    ) -> Result<ElementId, StoreError> {
        let original = self
            .document
            .elements
            .nodes
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownElement(id.clone()))?;

        let new_id = self.create(ElementSpec {
            kind: original.kind.clone(),
            tag: original.tag.clone(),
            parent,
            text: original.text.clone(),
        })?;
        id_map.insert(id.clone(), new_id.clone());

        {
            let new_element = self.document.elements.nodes.get_mut(&new_id).expect("just created");
            new_element.styles = original.styles.clone();
            new_element.classes = original.classes.clone();
            new_element.attrs = original.attrs.clone();
            // control and loop deliberately left None: §9 open question 4.
        }

        for child in &original.children {
            self.clone_subtree(child, Some(new_id.clone()), id_map)?;
        }

        Ok(new_id)
    }

    /// Creates a `layout`/`div` container, splices it into the
    /// original's parent at the original's position, and re-parents the
    /// original into the container.
    pub fn wrap(&mut self, id: &ElementId) -> Result<ElementId, StoreError> {
        self.tx("wrap", |s| {
            let original_parent = s
                .document
                .elements
                .nodes
                .get(id)
                .ok_or_else(|| StoreError::UnknownElement(id.clone()))?
                .parent
                .clone();

            let container = match &original_parent {
                Some(parent_id) => {
                    let index = s
                        .document
                        .elements
                        .nodes
                        .get(parent_id)
                        .and_then(|p| p.children.iter().position(|c| c == id))
                        .unwrap_or(0);
                    let container = s.create(ElementSpec {
                        kind: "layout".into(),
                        tag: "div".into(),
                        parent: Some(parent_id.clone()),
                        text: None,
                    })?;
                    // create() appended the container last; move it to
                    // the original's position.
                    s.insert(parent_id, &container, index)?;
                    container
                }
                None => {
                    let was_root = s.root_id().as_ref() == Some(id);
                    let container = s.create(ElementSpec {
                        kind: "layout".into(),
                        tag: "div".into(),
                        parent: None,
                        text: None,
                    })?;
                    if was_root {
                        s.document.elements.root_id = Some(container.clone());
                    }
                    container
                }
            };

            s.append(&container, id)?;
            Ok(container)
        })
    }

    /// Mutates `kind` only.
    pub fn convert(&mut self, id: &ElementId, new_kind: impl Into<String>) -> Result<(), StoreError> {
        self.tx("convert", |s| {
            let element = s
                .document
                .elements
                .nodes
                .get_mut(id)
                .ok_or_else(|| StoreError::UnknownElement(id.clone()))?;
            element.kind = new_kind.into();
            s.document.dirty.mark_element(id.clone());
            Ok(())
        })
    }
}
