//! Statement visitors and operand substitution
//! 
//! [`UseReplacer`] rebuilds a statement with one value substituted
//! wherever it is used. Each operand slot only accepts certain kinds of
//! value: binop operands must be immediates, array and field bases must
//! be locals, and so on. A substitution that breaks a slot's rule yields
//! [`Rewrite::NotApplicable`] rather than a malformed statement.

use bcir_common::IncompatibleUse;
use crate::expr::{BinopExpr, Expr, InvokeExpr};
use crate::refs::{ArrayRef, InstanceFieldRef, Ref};
use crate::stmt::{
    AssignStmt, EnterMonitorStmt, ExitMonitorStmt, GotoStmt, IdentityStmt, IfStmt,
    InvokeStmt, NopStmt, ReturnStmt, ReturnVoidStmt, Statement, SwitchStmt, ThrowStmt,
};
use crate::values::{Immediate, LValue, Local, Value};

/// One method per statement kind
pub trait StmtVisitor {
    type Output;

    fn visit_assign(&mut self, stmt: &AssignStmt) -> Self::Output;
    fn visit_identity(&mut self, stmt: &IdentityStmt) -> Self::Output;
    fn visit_invoke(&mut self, stmt: &InvokeStmt) -> Self::Output;
    fn visit_if(&mut self, stmt: &IfStmt) -> Self::Output;
    fn visit_goto(&mut self, stmt: &GotoStmt) -> Self::Output;
    fn visit_switch(&mut self, stmt: &SwitchStmt) -> Self::Output;
    fn visit_return(&mut self, stmt: &ReturnStmt) -> Self::Output;
    fn visit_return_void(&mut self, stmt: &ReturnVoidStmt) -> Self::Output;
    fn visit_throw(&mut self, stmt: &ThrowStmt) -> Self::Output;
    fn visit_enter_monitor(&mut self, stmt: &EnterMonitorStmt) -> Self::Output;
    fn visit_exit_monitor(&mut self, stmt: &ExitMonitorStmt) -> Self::Output;
    fn visit_nop(&mut self, stmt: &NopStmt) -> Self::Output;
}

/// Outcome of rebuilding a statement
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    Rewritten(Statement),
    NotApplicable(IncompatibleUse),
}

impl Rewrite {
    pub fn is_rewritten(&self) -> bool {
        matches!(self, Rewrite::Rewritten(_))
    }
}

impl<S: Into<Statement>> From<Result<S, IncompatibleUse>> for Rewrite {
    fn from(result: Result<S, IncompatibleUse>) -> Self {
        match result {
            Ok(stmt) => Rewrite::Rewritten(stmt.into()),
            Err(reason) => Rewrite::NotApplicable(reason),
        }
    }
}

/// Replaces every use of `old` with `new`
#[derive(Debug, Clone, Copy)]
pub struct UseReplacer<'a> {
    old: &'a Value,
    new: &'a Value,
}

impl<'a> UseReplacer<'a> {
    pub fn new(old: &'a Value, new: &'a Value) -> Self {
        Self { old, new }
    }

    fn immediate(&self, slot: &Immediate, name: &'static str) -> Result<Immediate, IncompatibleUse> {
        if self.old.as_immediate() == Some(slot) {
            Immediate::try_from(self.new.clone()).map_err(|e| e.in_slot(name))
        } else {
            Ok(slot.clone())
        }
    }

    fn local(&self, slot: &Local, name: &'static str) -> Result<Local, IncompatibleUse> {
        if self.old.as_local() == Some(slot) {
            Local::try_from(self.new.clone()).map_err(|e| e.in_slot(name))
        } else {
            Ok(slot.clone())
        }
    }

    fn binop(&self, binop: &BinopExpr) -> Result<BinopExpr, IncompatibleUse> {
        Ok(BinopExpr {
            op: binop.op,
            op1: self.immediate(&binop.op1, "binop operand")?,
            op2: self.immediate(&binop.op2, "binop operand")?,
        })
    }

    fn invoke(&self, invoke: &InvokeExpr) -> Result<InvokeExpr, IncompatibleUse> {
        let base = match &invoke.base {
            Some(base) => Some(self.local(base, "invoke receiver")?),
            None => None,
        };
        let args = invoke
            .args
            .iter()
            .map(|arg| self.immediate(arg, "invoke argument"))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(InvokeExpr {
            kind: invoke.kind,
            method: invoke.method.clone(),
            base,
            args,
        })
    }

    fn expr(&self, expr: &Expr) -> Result<Expr, IncompatibleUse> {
        Ok(match expr {
            Expr::Binop(binop) => Expr::Binop(self.binop(binop)?),
            Expr::Neg(op) => Expr::Neg(self.immediate(op, "negation operand")?),
            Expr::Cast { op, ty } => Expr::Cast {
                op: self.immediate(op, "cast operand")?,
                ty: ty.clone(),
            },
            Expr::InstanceOf { op, check } => Expr::InstanceOf {
                op: self.immediate(op, "instanceof operand")?,
                check: check.clone(),
            },
            Expr::Length(op) => Expr::Length(self.immediate(op, "length operand")?),
            Expr::New(class) => Expr::New(class.clone()),
            Expr::NewArray { element, size } => Expr::NewArray {
                element: element.clone(),
                size: self.immediate(size, "array size")?,
            },
            Expr::Invoke(invoke) => Expr::Invoke(self.invoke(invoke)?),
        })
    }

    fn array_ref(&self, array_ref: &ArrayRef) -> Result<ArrayRef, IncompatibleUse> {
        Ok(ArrayRef {
            base: self.local(&array_ref.base, "array base")?,
            index: self.immediate(&array_ref.index, "array index")?,
        })
    }

    fn instance_field_ref(&self, field_ref: &InstanceFieldRef) -> Result<InstanceFieldRef, IncompatibleUse> {
        Ok(InstanceFieldRef {
            base: self.local(&field_ref.base, "field base")?,
            field: field_ref.field.clone(),
        })
    }

    fn reference(&self, r: &Ref) -> Result<Ref, IncompatibleUse> {
        Ok(match r {
            Ref::Array(array_ref) => Ref::Array(self.array_ref(array_ref)?),
            Ref::InstanceField(field_ref) => Ref::InstanceField(self.instance_field_ref(field_ref)?),
            Ref::StaticField(_) | Ref::Identity(_) => r.clone(),
        })
    }

    /// Substitute inside a value without replacing the value itself
    fn nested(&self, value: &Value) -> Result<Value, IncompatibleUse> {
        Ok(match value {
            Value::Immediate(imm) => Value::Immediate(imm.clone()),
            Value::Expr(expr) => Value::Expr(self.expr(expr)?),
            Value::Ref(r) => Value::Ref(self.reference(r)?),
        })
    }

    /// The assignment target is a definition; only its operands are uses
    fn lvalue(&self, lvalue: &LValue) -> Result<LValue, IncompatibleUse> {
        Ok(match lvalue {
            LValue::Local(_) | LValue::StaticField(_) => lvalue.clone(),
            LValue::Array(array_ref) => LValue::Array(self.array_ref(array_ref)?),
            LValue::InstanceField(field_ref) => LValue::InstanceField(self.instance_field_ref(field_ref)?),
        })
    }

    fn assign(&self, stmt: &AssignStmt) -> Result<AssignStmt, IncompatibleUse> {
        let lhs = self.lvalue(&stmt.lhs)?;
        let rhs = if stmt.rhs == *self.old {
            if let Value::Ref(Ref::Identity(_)) = self.new {
                // Identity refs belong to identity statements only
                return Err(IncompatibleUse::new("assignment rhs", "a non-identity value", self.new));
            } else if lhs.is_local() {
                self.new.clone()
            } else {
                // Stores into memory take an immediate
                Immediate::try_from(self.new.clone())
                    .map_err(|e| e.in_slot("stored value"))?
                    .into()
            }
        } else {
            self.nested(&stmt.rhs)?
        };
        Ok(AssignStmt {
            lhs,
            rhs,
            position: stmt.position,
        })
    }

    fn invoke_stmt(&self, stmt: &InvokeStmt) -> Result<InvokeStmt, IncompatibleUse> {
        let invoke = if self.old.as_invoke() == Some(&stmt.invoke) {
            match self.new.as_invoke() {
                Some(invoke) => invoke.clone(),
                None => {
                    return Err(IncompatibleUse::new("invoke statement", "an invoke expression", self.new))
                }
            }
        } else {
            self.invoke(&stmt.invoke)?
        };
        Ok(InvokeStmt {
            invoke,
            position: stmt.position,
        })
    }

    fn if_stmt(&self, stmt: &IfStmt) -> Result<IfStmt, IncompatibleUse> {
        let condition = match (self.old, self.new) {
            (Value::Expr(Expr::Binop(old)), new) if *old == stmt.condition => match new {
                Value::Expr(Expr::Binop(binop)) if binop.op.is_condition() => binop.clone(),
                other => return Err(IncompatibleUse::new("if condition", "a condition expression", other)),
            },
            _ => self.binop(&stmt.condition)?,
        };
        Ok(IfStmt {
            condition,
            position: stmt.position,
        })
    }
}

impl StmtVisitor for UseReplacer<'_> {
    type Output = Rewrite;

    fn visit_assign(&mut self, stmt: &AssignStmt) -> Rewrite {
        self.assign(stmt).into()
    }

    /// Identity statements read nothing
    fn visit_identity(&mut self, stmt: &IdentityStmt) -> Rewrite {
        Rewrite::Rewritten(stmt.clone().into())
    }

    fn visit_invoke(&mut self, stmt: &InvokeStmt) -> Rewrite {
        self.invoke_stmt(stmt).into()
    }

    fn visit_if(&mut self, stmt: &IfStmt) -> Rewrite {
        self.if_stmt(stmt).into()
    }

    fn visit_goto(&mut self, stmt: &GotoStmt) -> Rewrite {
        Rewrite::Rewritten(stmt.clone().into())
    }

    fn visit_switch(&mut self, stmt: &SwitchStmt) -> Rewrite {
        self.immediate(&stmt.key, "switch key")
            .map(|key| SwitchStmt {
                key,
                values: stmt.values.clone(),
                position: stmt.position,
            })
            .into()
    }

    fn visit_return(&mut self, stmt: &ReturnStmt) -> Rewrite {
        self.immediate(&stmt.op, "return value")
            .map(|op| ReturnStmt { op, position: stmt.position })
            .into()
    }

    fn visit_return_void(&mut self, stmt: &ReturnVoidStmt) -> Rewrite {
        Rewrite::Rewritten(stmt.clone().into())
    }

    fn visit_throw(&mut self, stmt: &ThrowStmt) -> Rewrite {
        self.immediate(&stmt.op, "thrown value")
            .map(|op| ThrowStmt { op, position: stmt.position })
            .into()
    }

    fn visit_enter_monitor(&mut self, stmt: &EnterMonitorStmt) -> Rewrite {
        self.immediate(&stmt.op, "monitor operand")
            .map(|op| EnterMonitorStmt { op, position: stmt.position })
            .into()
    }

    fn visit_exit_monitor(&mut self, stmt: &ExitMonitorStmt) -> Rewrite {
        self.immediate(&stmt.op, "monitor operand")
            .map(|op| ExitMonitorStmt { op, position: stmt.position })
            .into()
    }

    fn visit_nop(&mut self, stmt: &NopStmt) -> Rewrite {
        Rewrite::Rewritten(stmt.clone().into())
    }
}
