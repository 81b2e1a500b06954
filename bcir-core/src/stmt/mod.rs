//! IR Statements
//! 
//! Every statement kind implements [`Stmt`], the contract consumed by
//! graph construction and dataflow passes: its use/def footprint, how
//! many normal successor edges it needs, guarded access to array and
//! field references, and operand substitution. [`Statement`] is the
//! closed set of kinds and forwards the contract to the kind it holds.
//!
//! The guarded accessors (`array_ref`, `field_ref`, `as_invokable_stmt`)
//! panic when their guard (`contains_array_ref`, `contains_field_ref`,
//! `is_invokable_stmt`) is false. Callers must check the guard first.

use bcir_common::{IrFault, Position};
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::refs::{ArrayRef, FieldRef};
use crate::rewrite::{Rewrite, StmtVisitor, UseReplacer};
use crate::values::{LValue, Value};

mod invokable;
mod kinds;

pub use self::invokable::InvokableStmt;
pub use self::kinds::{
    AssignStmt, EnterMonitorStmt, ExitMonitorStmt, GotoStmt, IdentityStmt, IfStmt,
    InvokeStmt, NopStmt, ReturnStmt, ReturnVoidStmt, SwitchStmt, ThrowStmt,
};

#[cfg(test)]
mod tests;

#[track_caller]
pub(crate) fn fault(fault: IrFault) -> ! {
    panic!("{fault}")
}

/// Contract shared by all statement kinds
pub trait Stmt: fmt::Display {
    fn position(&self) -> Position;

    /// Values read by this statement, in evaluation order
    ///
    /// Builds a fresh list on every call.
    fn uses(&self) -> Vec<Value> {
        Vec::new()
    }

    /// The location written by this statement, if any
    fn def(&self) -> Option<LValue> {
        None
    }

    /// All uses followed by the definition
    fn uses_and_defs(&self) -> Vec<Value> {
        let mut values = self.uses();
        if let Some(def) = self.def() {
            values.push(def.into());
        }
        values
    }

    /// Number of non-exceptional successor edges in the control flow graph
    fn expected_successor_count(&self) -> usize {
        1
    }

    /// Whether control can continue with the next statement in sequence
    fn falls_through(&self) -> bool {
        true
    }

    /// Whether this statement names explicit jump targets
    fn branches(&self) -> bool {
        false
    }

    fn contains_array_ref(&self) -> bool {
        false
    }

    /// Panics unless `contains_array_ref()` holds
    #[track_caller]
    fn array_ref(&self) -> &ArrayRef {
        fault(IrFault::no_array_ref(self))
    }

    fn contains_field_ref(&self) -> bool {
        false
    }

    /// Panics unless `contains_field_ref()` holds
    #[track_caller]
    fn field_ref(&self) -> FieldRef<'_> {
        fault(IrFault::no_field_ref(self))
    }

    /// Whether this statement invokes a method, directly or through an
    /// implied class initialization
    fn is_invokable_stmt(&self) -> bool {
        false
    }

    /// Panics unless `is_invokable_stmt()` holds
    #[track_caller]
    fn as_invokable_stmt(&self) -> InvokableStmt<'_> {
        fault(IrFault::not_invokable(self))
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output;

    /// Copy of this statement with every use of `old_use` replaced by `new_use`
    ///
    /// If `new_use` cannot stand where `old_use` stands, the statement is
    /// returned unchanged.
    fn with_new_use(&self, old_use: &Value, new_use: &Value) -> Statement
    where
        Self: Clone + Into<Statement>,
    {
        match self.accept(&mut UseReplacer::new(old_use, new_use)) {
            Rewrite::Rewritten(stmt) => stmt,
            Rewrite::NotApplicable(reason) => {
                trace!("keeping `{}` unchanged: {}", self, reason);
                self.clone().into()
            }
        }
    }
}

/// IR Statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// `lhs = rhs`
    Assign(AssignStmt),
    /// `local := @parameter0: int`
    Identity(IdentityStmt),
    /// Invocation whose result is discarded
    Invoke(InvokeStmt),
    /// Conditional branch
    If(IfStmt),
    Goto(GotoStmt),
    /// Multi-way branch on an int key
    Switch(SwitchStmt),
    Return(ReturnStmt),
    ReturnVoid(ReturnVoidStmt),
    Throw(ThrowStmt),
    EnterMonitor(EnterMonitorStmt),
    ExitMonitor(ExitMonitorStmt),
    Nop(NopStmt),
}

macro_rules! dispatch {
    ($stmt:expr, $s:ident => $body:expr) => {
        match $stmt {
            Statement::Assign($s) => $body,
            Statement::Identity($s) => $body,
            Statement::Invoke($s) => $body,
            Statement::If($s) => $body,
            Statement::Goto($s) => $body,
            Statement::Switch($s) => $body,
            Statement::Return($s) => $body,
            Statement::ReturnVoid($s) => $body,
            Statement::Throw($s) => $body,
            Statement::EnterMonitor($s) => $body,
            Statement::ExitMonitor($s) => $body,
            Statement::Nop($s) => $body,
        }
    };
}

impl Stmt for Statement {
    fn position(&self) -> Position {
        dispatch!(self, s => s.position())
    }

    fn uses(&self) -> Vec<Value> {
        dispatch!(self, s => s.uses())
    }

    fn def(&self) -> Option<LValue> {
        dispatch!(self, s => s.def())
    }

    fn uses_and_defs(&self) -> Vec<Value> {
        dispatch!(self, s => s.uses_and_defs())
    }

    fn expected_successor_count(&self) -> usize {
        dispatch!(self, s => s.expected_successor_count())
    }

    fn falls_through(&self) -> bool {
        dispatch!(self, s => s.falls_through())
    }

    fn branches(&self) -> bool {
        dispatch!(self, s => s.branches())
    }

    fn contains_array_ref(&self) -> bool {
        dispatch!(self, s => s.contains_array_ref())
    }

    #[track_caller]
    fn array_ref(&self) -> &ArrayRef {
        dispatch!(self, s => s.array_ref())
    }

    fn contains_field_ref(&self) -> bool {
        dispatch!(self, s => s.contains_field_ref())
    }

    #[track_caller]
    fn field_ref(&self) -> FieldRef<'_> {
        dispatch!(self, s => s.field_ref())
    }

    fn is_invokable_stmt(&self) -> bool {
        dispatch!(self, s => s.is_invokable_stmt())
    }

    #[track_caller]
    fn as_invokable_stmt(&self) -> InvokableStmt<'_> {
        dispatch!(self, s => s.as_invokable_stmt())
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output {
        dispatch!(self, s => s.accept(visitor))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, s => write!(f, "{s}"))
    }
}

macro_rules! impl_from_kind {
    ($($kind:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$kind> for Statement {
                fn from(stmt: $kind) -> Self {
                    Statement::$variant(stmt)
                }
            }
        )*
    };
}

impl_from_kind! {
    AssignStmt => Assign,
    IdentityStmt => Identity,
    InvokeStmt => Invoke,
    IfStmt => If,
    GotoStmt => Goto,
    SwitchStmt => Switch,
    ReturnStmt => Return,
    ReturnVoidStmt => ReturnVoid,
    ThrowStmt => Throw,
    EnterMonitorStmt => EnterMonitor,
    ExitMonitorStmt => ExitMonitor,
    NopStmt => Nop,
}
