//! Event mutators: attaching and detaching handlers, in the same shape
//! as `bindings.rs`'s `bind_text`/`unbind_text`. Needed for cascade
//! delete, `duplicate`, and compiler emission to have anything to work
//! with.

use crate::document::{Action, Event, EventType};
use crate::error::StoreError;
use crate::ids::{ElementId, EventId};

use super::Store;

impl Store {
    /// Attaches `action` to `target` under `event_type`, requiring the
    /// element to exist.
    pub fn on(&mut self, event_type: impl Into<EventType>, target: &ElementId, action: Action) -> Result<EventId, StoreError> {
        self.require_tx()?;
        if !self.document.elements.nodes.contains_key(target) {
            return Err(StoreError::UnknownElement(target.clone()));
        }
        let id = self.mint_event();
        self.document.events.entry(event_type.into()).or_default().push(Event {
            id: id.clone(),
            target: target.clone(),
            action,
        });
        self.document.dirty.mark_event(id.clone());
        Ok(id)
    }

    /// Detaches the event with this id, if any.
    pub fn off(&mut self, id: &EventId) -> Result<(), StoreError> {
        self.require_tx()?;
        for events in self.document.events.values_mut() {
            events.retain(|e| &e.id != id);
        }
        self.document.events.retain(|_, events| !events.is_empty());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::document::{ElementSpec, UpdateOp};

    use super::*;

    #[test]
    fn on_registers_an_event_under_its_type() {
        let mut store = Store::new();
        store
            .tx("setup", |s| {
                let id = s.create(ElementSpec {
                    kind: "button".into(),
                    tag: "button".into(),
                    parent: None,
                    text: None,
                })?;
                s.var(crate::document::VariableSpec::new(
                    "count",
                    crate::document::VariableType::Reactive,
                    crate::value::Value::number(0.0),
                ))?;
                s.on(
                    "click",
                    &id,
                    Action::Update {
                        target: "count".to_string(),
                        op: UpdateOp::AddAssign,
                        value: "1".to_string(),
                    },
                )?;
                Ok(())
            })
            .unwrap();

        assert_eq!(store.events("click").len(), 1);
    }

    #[test]
    fn off_removes_the_event_and_drops_an_empty_type_collection() {
        let mut store = Store::new();
        let event_id = store
            .tx("setup", |s| {
                let id = s.create(ElementSpec {
                    kind: "button".into(),
                    tag: "button".into(),
                    parent: None,
                    text: None,
                })?;
                s.on("click", &id, Action::Call { function: "go".to_string() })
            })
            .unwrap();

        store.tx("teardown", |s| s.off(&event_id)).unwrap();
        assert!(store.events("click").is_empty());
    }

    #[test]
    fn on_rejects_unknown_target() {
        let mut store = Store::new();
        let result = store.tx("setup", |s| {
            s.on("click", &ElementId::mint(99, 0), Action::Call { function: "go".to_string() })
        });
        assert!(matches!(result, Err(StoreError::UnknownElement(_))));
    }
}
