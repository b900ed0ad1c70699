//! IR Store — a single authoritative, transactional, undoable in-memory
//! model of the UI program.

mod bindings;
mod conditionals;
mod config;
mod elements;
mod events;
mod history;
mod loops;
mod macros;
mod tx;
mod validate;
mod variables;

pub use config::StoreConfig;
pub use tx::TxFrame;
pub use validate::Violation;

use crate::document::Document;
use crate::error::StoreError;
use crate::frozen::Frozen;
use crate::ids::{BindingId, ElementId, EventId, GroupId, VariableId};

use history::History;

/// Per-entity-type monotonic counters used to mint ids.
#[derive(Debug, Clone, Default)]
struct Counters {
    element: u64,
    variable: u64,
    binding: u64,
    event: u64,
    group: u64,
}

pub struct Store {
    document: Document,
    tx_stack: Vec<TxFrame>,
    history: History,
    config: StoreConfig,
    counters: Counters,
    clock: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        let clock = config.id_seed;
        let document = Document::new(clock);
        let history = History::new(config.history_capacity, document.deep_clone());
        Self {
            document,
            tx_stack: Vec::new(),
            history,
            config,
            counters: Counters::default(),
            clock,
        }
    }

    /// Advances and returns the store's logical clock. Stands in for a
    /// creation timestamp without reading the system clock, so that ids
    /// minted from a given sequence of operations are reproducible.
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn mint_element(&mut self) -> ElementId {
        self.counters.element += 1;
        let counter = self.counters.element;
        let ts = self.tick();
        ElementId::mint(counter, ts)
    }

    fn mint_variable(&mut self) -> VariableId {
        self.counters.variable += 1;
        let counter = self.counters.variable;
        let ts = self.tick();
        VariableId::mint(counter, ts)
    }

    fn mint_binding(&mut self) -> BindingId {
        self.counters.binding += 1;
        let counter = self.counters.binding;
        let ts = self.tick();
        BindingId::mint(counter, ts)
    }

    fn mint_event(&mut self) -> EventId {
        self.counters.event += 1;
        let counter = self.counters.event;
        let ts = self.tick();
        EventId::mint(counter, ts)
    }

    fn mint_group(&mut self) -> GroupId {
        self.counters.group += 1;
        let counter = self.counters.group;
        let ts = self.tick();
        GroupId::mint(counter, ts)
    }

    // -- Transactional discipline --------------------

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn begin_tx(&mut self, label: impl Into<String> + std::fmt::Debug) {
        let label = label.into();
        let started_at = self.tick();
        tracing::debug!(%label, depth = self.tx_stack.len() + 1, "begin_tx");
        self.tx_stack
            .push(TxFrame::new(label, self.document.deep_clone(), started_at));
    }

    fn require_tx(&self) -> Result<(), StoreError> {
        if self.tx_stack.is_empty() {
            Err(StoreError::NoTransactionOpen)
        } else {
            Ok(())
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn commit(&mut self) -> Result<(), StoreError> {
        let frame = self.tx_stack.pop().ok_or(StoreError::NoActiveFrame)?;
        if self.tx_stack.is_empty() {
            self.document.meta.modified = self.tick();
            self.history.push(self.document.deep_clone());
            tracing::debug!(label = %frame.label, history_len = self.history.len(), "commit (outermost)");
        } else {
            tracing::debug!(label = %frame.label, "commit (nested, collapsed)");
        }
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn rollback(&mut self) -> Result<(), StoreError> {
        let frame = self.tx_stack.pop().ok_or(StoreError::NoActiveFrame)?;
        self.document = frame.snapshot;
        tracing::debug!(label = %frame.label, "rollback");
        Ok(())
    }

    /// Scoped transaction form: open, run `f`, commit on `Ok`, roll back
    /// and propagate the error on `Err`.
    pub fn tx<T>(
        &mut self,
        label: impl Into<String> + std::fmt::Debug,
        f: impl FnOnce(&mut Store) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        self.begin_tx(label);
        match f(self) {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(err) => {
                // rollback() only fails if no frame is open, which
                // cannot happen here since begin_tx just pushed one.
                self.rollback().expect("frame pushed by begin_tx above");
                Err(err)
            }
        }
    }

    pub fn in_transaction(&self) -> bool {
        !self.tx_stack.is_empty()
    }

    // -- History --------------------------------------

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn undo(&mut self) -> Result<bool, StoreError> {
        if self.in_transaction() {
            return Err(StoreError::TransactionOpenDuringHistoryOp);
        }
        match self.history.undo() {
            Some(doc) => {
                self.document = doc;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn redo(&mut self) -> Result<bool, StoreError> {
        if self.in_transaction() {
            return Err(StoreError::TransactionOpenDuringHistoryOp);
        }
        match self.history.redo() {
            Some(doc) => {
                self.document = doc;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // -- Frozen snapshot for the compiler --------------------------------

    /// Returns a deep-frozen clone of the current document.
    pub fn get_ir(&self) -> Frozen<Document> {
        Frozen::new(self.document.deep_clone())
    }

    // -- Generic queries ---------------------

    pub fn get(&self, id: &ElementId) -> Option<crate::document::Element> {
        self.document.elements.get(id).cloned()
    }

    pub fn children(&self, id: &ElementId) -> Option<Vec<ElementId>> {
        self.document.elements.get(id).map(|e| e.children.clone())
    }

    pub fn parent(&self, id: &ElementId) -> Option<Option<ElementId>> {
        self.document.elements.get(id).map(|e| e.parent.clone())
    }

    pub fn root_id(&self) -> Option<ElementId> {
        self.document.elements.root_id.clone()
    }

    pub fn get_bindings(&self, id: &ElementId) -> Vec<crate::document::Binding> {
        self.document
            .bindings
            .iter()
            .filter(|b| &b.element_id == id)
            .cloned()
            .collect()
    }

    pub fn get_loop(&self, id: &ElementId) -> Option<crate::document::LoopDescriptor> {
        self.document.elements.get(id).and_then(|e| e.loop_.clone())
    }

    pub fn events(&self, event_type: &str) -> Vec<crate::document::Event> {
        self.document
            .events
            .get(event_type)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
