//! Error types for the bytecode IR
//! 
//! Two kinds of failure exist. `IrFault` describes a broken precondition
//! (a guarded accessor called without checking its guard) and is only
//! ever used as a panic payload. `IncompatibleUse` describes an operand
//! substitution that cannot be applied; it is returned as a value and
//! the statement layer turns it into a no-op.

use thiserror::Error;

/// Precondition violations on guarded statement accessors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IrFault {
    #[error("precondition violated: `{stmt}` contains no array reference")]
    NoArrayRef { stmt: String },

    #[error("precondition violated: `{stmt}` contains no field reference")]
    NoFieldRef { stmt: String },

    #[error("precondition violated: `{stmt}` is not an invokable statement")]
    NotInvokable { stmt: String },
}

impl IrFault {
    pub fn no_array_ref(stmt: impl ToString) -> Self {
        IrFault::NoArrayRef { stmt: stmt.to_string() }
    }

    pub fn no_field_ref(stmt: impl ToString) -> Self {
        IrFault::NoFieldRef { stmt: stmt.to_string() }
    }

    pub fn not_invokable(stmt: impl ToString) -> Self {
        IrFault::NotInvokable { stmt: stmt.to_string() }
    }
}

/// A value that cannot legally occupy an operand slot
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot place `{value}` in {slot} (expected {expected})")]
pub struct IncompatibleUse {
    /// Which operand slot rejected the value, e.g. "binop operand"
    pub slot: &'static str,
    /// The kind of value the slot accepts
    pub expected: &'static str,
    /// Text of the rejected value
    pub value: String,
}

impl IncompatibleUse {
    pub fn new(slot: &'static str, expected: &'static str, value: impl ToString) -> Self {
        Self {
            slot,
            expected,
            value: value.to_string(),
        }
    }

    /// Re-label the error with the slot it was raised for
    pub fn in_slot(mut self, slot: &'static str) -> Self {
        self.slot = slot;
        self
    }
}
