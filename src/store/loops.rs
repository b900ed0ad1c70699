//! Loop mutators.

use crate::document::LoopDescriptor;
use crate::error::StoreError;
use crate::ids::ElementId;

use super::validate::is_valid_identifier;
use super::Store;

impl Store {
    /// Attaches a loop descriptor after checking `source` exists and
    /// that `alias`/`index` are valid identifiers.
    pub fn set_loop(
        &mut self,
        id: &ElementId,
        source: impl Into<String>,
        alias: impl Into<String>,
        index: Option<String>,
        key: Option<String>,
    ) -> Result<(), StoreError> {
        self.require_tx()?;
        let source = source.into();
        let alias = alias.into();
        if !self.document.variables.name_exists(&source) {
            return Err(StoreError::UnknownVariable(source));
        }
        if !is_valid_identifier(&alias) {
            return Err(StoreError::InvalidLoopIdentifier { field: "alias", value: alias });
        }
        if let Some(idx) = &index
            && !is_valid_identifier(idx)
        {
            return Err(StoreError::InvalidLoopIdentifier {
                field: "index",
                value: idx.clone(),
            });
        }
        let element = self
            .document
            .elements
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownElement(id.clone()))?;
        element.loop_ = Some(LoopDescriptor { source, alias, index, key });
        self.document.dirty.mark_loop(id.clone());
        Ok(())
    }

    /// Merges fields into an existing loop descriptor.
    pub fn update_loop(
        &mut self,
        id: &ElementId,
        source: Option<String>,
        alias: Option<String>,
        index: Option<Option<String>>,
        key: Option<Option<String>>,
    ) -> Result<(), StoreError> {
        self.require_tx()?;
        if let Some(ref source) = source
            && !self.document.variables.name_exists(source)
        {
            return Err(StoreError::UnknownVariable(source.clone()));
        }
        if let Some(ref alias) = alias
            && !is_valid_identifier(alias)
        {
            return Err(StoreError::InvalidLoopIdentifier {
                field: "alias",
                value: alias.clone(),
            });
        }
        if let Some(Some(ref idx)) = index
            && !is_valid_identifier(idx)
        {
            return Err(StoreError::InvalidLoopIdentifier {
                field: "index",
                value: idx.clone(),
            });
        }
        let element = self
            .document
            .elements
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownElement(id.clone()))?;
        let current = element.loop_.as_mut().ok_or_else(|| StoreError::UnknownElement(id.clone()))?;
        if let Some(source) = source {
            current.source = source;
        }
        if let Some(alias) = alias {
            current.alias = alias;
        }
        if let Some(index) = index {
            current.index = index;
        }
        if let Some(key) = key {
            current.key = key;
        }
        self.document.dirty.mark_loop(id.clone());
        Ok(())
    }

    /// Clears a loop descriptor.
    pub fn remove_loop(&mut self, id: &ElementId) -> Result<(), StoreError> {
        self.require_tx()?;
        let element = self
            .document
            .elements
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownElement(id.clone()))?;
        element.loop_ = None;
        self.document.dirty.mark_loop(id.clone());
        Ok(())
    }

    /// Returns the list of shape violations (non-fatal, collected, never thrown).
    pub fn validate_loops(&self) -> Vec<super::Violation> {
        super::validate::check_loops(&self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_validation() {
        assert!(is_valid_identifier("item"));
        assert!(is_valid_identifier("_x"));
        assert!(is_valid_identifier("$idx"));
        assert!(!is_valid_identifier("1item"));
        assert!(!is_valid_identifier("it-em"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn update_loop_rejects_an_invalid_index_identifier() {
        use crate::document::{ElementSpec, VariableSpec, VariableType};
        use crate::value::Value;

        let mut store = Store::new();
        let result = store.tx("setup", |s| {
            let id = s.create(ElementSpec {
                kind: "loop".into(),
                tag: "div".into(),
                parent: None,
                text: None,
            })?;
            s.var(VariableSpec::new("items", VariableType::Static, Value::Array(vec![])))?;
            s.set_loop(&id, "items", "item", None, None)?;
            s.update_loop(&id, None, None, Some(Some("1bad".to_string())), None)
        });
        assert_eq!(
            result,
            Err(StoreError::InvalidLoopIdentifier {
                field: "index",
                value: "1bad".to_string(),
            })
        );
    }
}
