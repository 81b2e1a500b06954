//! View over statements that invoke code

use bcir_common::Position;
use crate::expr::{InvokeExpr, InvokeKind};
use crate::stmt::{AssignStmt, InvokeStmt, Stmt};

/// A statement that calls a method, either explicitly or by triggering
/// a class initializer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvokableStmt<'a> {
    Invoke(&'a InvokeStmt),
    Assign(&'a AssignStmt),
}

impl<'a> InvokableStmt<'a> {
    /// The explicit invocation, absent for implied class initialization
    pub fn invoke_expr(&self) -> Option<&'a InvokeExpr> {
        match *self {
            InvokableStmt::Invoke(stmt) => Some(&stmt.invoke),
            InvokableStmt::Assign(stmt) => stmt.invoke_expr(),
        }
    }

    pub fn contains_invoke_expr(&self) -> bool {
        self.invoke_expr().is_some()
    }

    /// Whether executing this statement may run a static initializer
    pub fn invokes_static_initializer(&self) -> bool {
        let static_call = self
            .invoke_expr()
            .is_some_and(|invoke| invoke.kind == InvokeKind::Static);
        match *self {
            InvokableStmt::Invoke(_) => static_call,
            InvokableStmt::Assign(stmt) => static_call || stmt.implies_class_init(),
        }
    }

    pub fn position(&self) -> Position {
        match *self {
            InvokableStmt::Invoke(stmt) => stmt.position(),
            InvokableStmt::Assign(stmt) => stmt.position(),
        }
    }
}
