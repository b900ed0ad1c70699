//! Error taxonomy.
//!
//! Transaction misuse, reference errors and state violations are fatal
//! and flow through [`StoreError`]; shape violations are non-fatal and
//! are returned as [`crate::store::validate::Violation`] lists, never
//! constructed as errors. Compilation failures flow through
//! [`CompileError`].

use thiserror::Error;

use crate::ids::{ElementId, GroupId, VariableName};

/// Errors raised by [`crate::store::Store`] mutators.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StoreError {
    /// A mutator was called with no transaction open.
    #[error("no transaction is open")]
    NoTransactionOpen,

    /// `commit`/`rollback` called with no active frame.
    #[error("commit/rollback called with no active transaction frame")]
    NoActiveFrame,

    /// `undo`/`redo` called while a transaction is open.
    #[error("undo/redo is not permitted while a transaction is open")]
    TransactionOpenDuringHistoryOp,

    /// Operated on an element id that does not exist.
    #[error("unknown element: {0}")]
    UnknownElement(ElementId),

    /// Operated on a variable name that does not exist.
    #[error("unknown variable: {0}")]
    UnknownVariable(VariableName),

    /// Operated on a conditional group id that does not exist.
    #[error("unknown conditional group: {0}")]
    UnknownGroup(GroupId),

    /// `setText` called on an element whose text is bound.
    #[error("element {0} already has a text binding; call unbindText first")]
    TextAlreadyBound(ElementId),

    /// `bindText` called on an element with static text.
    #[error("element {0} already has static text; call setText(None) first")]
    TextAlreadyStatic(ElementId),

    /// `addElse` called on a group that already has an else branch.
    #[error("conditional group {0} already has an else branch")]
    DuplicateElse(GroupId),

    /// `addElif`/`addElse` called on a group with no `if` yet.
    #[error("conditional group {0} has no if element")]
    MissingIf(GroupId),

    /// `updateCondition` called on an `else` element.
    #[error("element {0} is an else branch and carries no expression")]
    ElseHasNoExpr(ElementId),

    /// `updateVar` called on a `static` variable.
    #[error("variable {0} is static and cannot be updated")]
    StaticVariableUpdate(VariableName),

    /// `var` called with a name already used by another variable.
    #[error("duplicate variable name: {0}")]
    DuplicateVariableName(VariableName),

    /// A loop alias or index was not a syntactically valid identifier.
    #[error("invalid identifier for loop {field}: {value:?}")]
    InvalidLoopIdentifier { field: &'static str, value: String },
}

/// Errors raised by [`crate::compiler::compile`].
///
/// These surface IR that the store would normally have rejected but that
/// reached the compiler through a hand-constructed or deserialized
/// snapshot.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CompileError {
    #[error("binding references unknown element {0}")]
    BindingUnknownElement(ElementId),

    #[error("binding references unknown variable {0}")]
    BindingUnknownVariable(VariableName),

    #[error("event targets unknown element {0}")]
    EventUnknownElement(ElementId),

    #[error("loop on element {element} references unknown variable {source}")]
    LoopUnknownSource {
        element: ElementId,
        source: VariableName,
    },

    #[error("conditional group {0} has no if element")]
    GroupMissingIf(GroupId),

    #[error("conditional group {0} violates the sibling-parent rule")]
    GroupSiblingViolation(GroupId),

    #[error("document has no root element")]
    MissingRoot,

    #[error("element {0} is listed as a child but does not exist")]
    DanglingChild(ElementId),
}
