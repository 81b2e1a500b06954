//! Concrete statement kinds

use bcir_common::{IrFault, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::expr::{BinopExpr, Expr, InvokeExpr};
use crate::refs::{ArrayRef, FieldRef, IdentityRef, Ref};
use crate::rewrite::StmtVisitor;
use crate::stmt::{fault, InvokableStmt, Stmt};
use crate::values::{Immediate, LValue, Local, Value};

/// `lhs = rhs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignStmt {
    pub lhs: LValue,
    pub rhs: Value,
    pub position: Position,
}

impl AssignStmt {
    pub fn new(lhs: impl Into<LValue>, rhs: impl Into<Value>, position: Position) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
            position,
        }
    }

    pub(crate) fn invoke_expr(&self) -> Option<&InvokeExpr> {
        self.rhs.as_invoke()
    }

    /// Static field access or object allocation triggers class initialization
    pub(crate) fn implies_class_init(&self) -> bool {
        matches!(self.lhs, LValue::StaticField(_))
            || matches!(self.rhs, Value::Ref(Ref::StaticField(_)) | Value::Expr(Expr::New(_)))
    }
}

impl Stmt for AssignStmt {
    fn position(&self) -> Position {
        self.position
    }

    /// Target operands (`a`, `i` in `a[i] = ...`), then right-hand side operands,
    /// then the right-hand side itself
    fn uses(&self) -> Vec<Value> {
        let mut uses = self.lhs.uses();
        uses.extend(self.rhs.uses());
        uses.push(self.rhs.clone());
        uses
    }

    fn def(&self) -> Option<LValue> {
        Some(self.lhs.clone())
    }

    fn contains_array_ref(&self) -> bool {
        matches!(self.lhs, LValue::Array(_)) || self.rhs.as_array_ref().is_some()
    }

    #[track_caller]
    fn array_ref(&self) -> &ArrayRef {
        match (&self.lhs, self.rhs.as_array_ref()) {
            (LValue::Array(array_ref), _) => array_ref,
            (_, Some(array_ref)) => array_ref,
            _ => fault(IrFault::no_array_ref(self)),
        }
    }

    fn contains_field_ref(&self) -> bool {
        matches!(self.lhs, LValue::InstanceField(_) | LValue::StaticField(_))
            || self.rhs.as_field_ref().is_some()
    }

    #[track_caller]
    fn field_ref(&self) -> FieldRef<'_> {
        match &self.lhs {
            LValue::InstanceField(field_ref) => FieldRef::Instance(field_ref),
            LValue::StaticField(field_ref) => FieldRef::Static(field_ref),
            _ => match self.rhs.as_field_ref() {
                Some(field_ref) => field_ref,
                None => fault(IrFault::no_field_ref(self)),
            },
        }
    }

    fn is_invokable_stmt(&self) -> bool {
        self.invoke_expr().is_some() || self.implies_class_init()
    }

    #[track_caller]
    fn as_invokable_stmt(&self) -> InvokableStmt<'_> {
        if !self.is_invokable_stmt() {
            fault(IrFault::not_invokable(self));
        }
        InvokableStmt::Assign(self)
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_assign(self)
    }
}

impl fmt::Display for AssignStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// Binds a parameter, `this` or the caught exception to a local
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityStmt {
    pub local: Local,
    pub rhs: IdentityRef,
    pub position: Position,
}

impl IdentityStmt {
    pub fn new(local: Local, rhs: IdentityRef, position: Position) -> Self {
        Self { local, rhs, position }
    }
}

impl Stmt for IdentityStmt {
    fn position(&self) -> Position {
        self.position
    }

    fn def(&self) -> Option<LValue> {
        Some(LValue::Local(self.local.clone()))
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_identity(self)
    }
}

impl fmt::Display for IdentityStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} := {}", self.local, self.rhs)
    }
}

/// Invocation evaluated for its side effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeStmt {
    pub invoke: InvokeExpr,
    pub position: Position,
}

impl InvokeStmt {
    pub fn new(invoke: InvokeExpr, position: Position) -> Self {
        Self { invoke, position }
    }
}

impl Stmt for InvokeStmt {
    fn position(&self) -> Position {
        self.position
    }

    fn uses(&self) -> Vec<Value> {
        let mut uses = self.invoke.uses();
        uses.push(self.invoke.clone().into());
        uses
    }

    fn is_invokable_stmt(&self) -> bool {
        true
    }

    fn as_invokable_stmt(&self) -> InvokableStmt<'_> {
        InvokableStmt::Invoke(self)
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_invoke(self)
    }
}

impl fmt::Display for InvokeStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.invoke)
    }
}

/// `if condition goto <target>`; the target lives in the control flow graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub condition: BinopExpr,
    pub position: Position,
}

impl IfStmt {
    pub fn new(condition: BinopExpr, position: Position) -> Self {
        Self { condition, position }
    }
}

impl Stmt for IfStmt {
    fn position(&self) -> Position {
        self.position
    }

    fn uses(&self) -> Vec<Value> {
        let mut uses = self.condition.uses();
        uses.push(self.condition.clone().into());
        uses
    }

    /// Fall-through edge and branch edge
    fn expected_successor_count(&self) -> usize {
        2
    }

    fn branches(&self) -> bool {
        true
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_if(self)
    }
}

impl fmt::Display for IfStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if {}", self.condition)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GotoStmt {
    pub position: Position,
}

impl GotoStmt {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

impl Stmt for GotoStmt {
    fn position(&self) -> Position {
        self.position
    }

    fn falls_through(&self) -> bool {
        false
    }

    fn branches(&self) -> bool {
        true
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_goto(self)
    }
}

impl fmt::Display for GotoStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "goto")
    }
}

/// Switch over `key`; one edge per case value plus the default edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStmt {
    pub key: Immediate,
    pub values: Vec<i32>,
    pub position: Position,
}

impl SwitchStmt {
    pub fn new(key: impl Into<Immediate>, values: Vec<i32>, position: Position) -> Self {
        Self {
            key: key.into(),
            values,
            position,
        }
    }
}

impl Stmt for SwitchStmt {
    fn position(&self) -> Position {
        self.position
    }

    fn uses(&self) -> Vec<Value> {
        vec![self.key.clone().into()]
    }

    fn expected_successor_count(&self) -> usize {
        self.values.len() + 1
    }

    fn falls_through(&self) -> bool {
        false
    }

    fn branches(&self) -> bool {
        true
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_switch(self)
    }
}

impl fmt::Display for SwitchStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "switch({}) [", self.key)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    pub op: Immediate,
    pub position: Position,
}

impl ReturnStmt {
    pub fn new(op: impl Into<Immediate>, position: Position) -> Self {
        Self {
            op: op.into(),
            position,
        }
    }
}

impl Stmt for ReturnStmt {
    fn position(&self) -> Position {
        self.position
    }

    fn uses(&self) -> Vec<Value> {
        vec![self.op.clone().into()]
    }

    fn expected_successor_count(&self) -> usize {
        0
    }

    fn falls_through(&self) -> bool {
        false
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_return(self)
    }
}

impl fmt::Display for ReturnStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "return {}", self.op)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnVoidStmt {
    pub position: Position,
}

impl ReturnVoidStmt {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

impl Stmt for ReturnVoidStmt {
    fn position(&self) -> Position {
        self.position
    }

    fn expected_successor_count(&self) -> usize {
        0
    }

    fn falls_through(&self) -> bool {
        false
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_return_void(self)
    }
}

impl fmt::Display for ReturnVoidStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "return")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowStmt {
    pub op: Immediate,
    pub position: Position,
}

impl ThrowStmt {
    pub fn new(op: impl Into<Immediate>, position: Position) -> Self {
        Self {
            op: op.into(),
            position,
        }
    }
}

impl Stmt for ThrowStmt {
    fn position(&self) -> Position {
        self.position
    }

    fn uses(&self) -> Vec<Value> {
        vec![self.op.clone().into()]
    }

    /// Only exceptional edges leave a throw
    fn expected_successor_count(&self) -> usize {
        0
    }

    fn falls_through(&self) -> bool {
        false
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_throw(self)
    }
}

impl fmt::Display for ThrowStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "throw {}", self.op)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnterMonitorStmt {
    pub op: Immediate,
    pub position: Position,
}

impl EnterMonitorStmt {
    pub fn new(op: impl Into<Immediate>, position: Position) -> Self {
        Self {
            op: op.into(),
            position,
        }
    }
}

impl Stmt for EnterMonitorStmt {
    fn position(&self) -> Position {
        self.position
    }

    fn uses(&self) -> Vec<Value> {
        vec![self.op.clone().into()]
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_enter_monitor(self)
    }
}

impl fmt::Display for EnterMonitorStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entermonitor {}", self.op)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitMonitorStmt {
    pub op: Immediate,
    pub position: Position,
}

impl ExitMonitorStmt {
    pub fn new(op: impl Into<Immediate>, position: Position) -> Self {
        Self {
            op: op.into(),
            position,
        }
    }
}

impl Stmt for ExitMonitorStmt {
    fn position(&self) -> Position {
        self.position
    }

    fn uses(&self) -> Vec<Value> {
        vec![self.op.clone().into()]
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_exit_monitor(self)
    }
}

impl fmt::Display for ExitMonitorStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exitmonitor {}", self.op)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NopStmt {
    pub position: Position,
}

impl NopStmt {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

impl Stmt for NopStmt {
    fn position(&self) -> Position {
        self.position
    }

    fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_nop(self)
    }
}

impl fmt::Display for NopStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nop")
    }
}
