//! IR Value Representations
//! 
//! Operands of IR statements. An [`Immediate`] is atomic (a local or a
//! constant); a [`Value`] is any operand, including composite expressions
//! and memory/identity references. An [`LValue`] is a location a
//! statement can write.

use bcir_common::{escape, IncompatibleUse};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::constants::Constant;
use crate::expr::{BinopExpr, Expr, InvokeExpr};
use crate::refs::{ArrayRef, FieldRef, InstanceFieldRef, Ref, StaticFieldRef};
use crate::types::Type;

/// Local variable of the method body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Local {
    pub name: String,
    pub ty: Type,
}

impl Local {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for Local {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", escape(&self.name))
    }
}

/// Atomic operand
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Immediate {
    Local(Local),
    Constant(Constant),
}

impl Immediate {
    pub fn ty(&self) -> Type {
        match self {
            Immediate::Local(local) => local.ty.clone(),
            Immediate::Constant(constant) => constant.ty(),
        }
    }
}

impl fmt::Display for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Immediate::Local(local) => write!(f, "{local}"),
            Immediate::Constant(constant) => write!(f, "{constant}"),
        }
    }
}

/// Any operand of a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Immediate(Immediate),
    Expr(Expr),
    Ref(Ref),
}

impl Value {
    pub fn ty(&self) -> Type {
        match self {
            Value::Immediate(imm) => imm.ty(),
            Value::Expr(expr) => expr.ty(),
            Value::Ref(r) => r.ty(),
        }
    }

    /// Values read when evaluating this one, not including itself
    pub fn uses(&self) -> Vec<Value> {
        match self {
            Value::Immediate(_) => Vec::new(),
            Value::Expr(expr) => expr.uses(),
            Value::Ref(r) => r.uses(),
        }
    }

    pub fn as_immediate(&self) -> Option<&Immediate> {
        match self {
            Value::Immediate(imm) => Some(imm),
            _ => None,
        }
    }

    pub fn as_local(&self) -> Option<&Local> {
        match self {
            Value::Immediate(Immediate::Local(local)) => Some(local),
            _ => None,
        }
    }

    pub fn as_invoke(&self) -> Option<&InvokeExpr> {
        match self {
            Value::Expr(Expr::Invoke(invoke)) => Some(invoke),
            _ => None,
        }
    }

    pub fn as_array_ref(&self) -> Option<&ArrayRef> {
        match self {
            Value::Ref(Ref::Array(array_ref)) => Some(array_ref),
            _ => None,
        }
    }

    pub fn as_field_ref(&self) -> Option<FieldRef<'_>> {
        match self {
            Value::Ref(Ref::InstanceField(field_ref)) => Some(FieldRef::Instance(field_ref)),
            Value::Ref(Ref::StaticField(field_ref)) => Some(FieldRef::Static(field_ref)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Immediate(imm) => write!(f, "{imm}"),
            Value::Expr(expr) => write!(f, "{expr}"),
            Value::Ref(r) => write!(f, "{r}"),
        }
    }
}

/// Assignable location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LValue {
    Local(Local),
    Array(ArrayRef),
    InstanceField(InstanceFieldRef),
    StaticField(StaticFieldRef),
}

impl LValue {
    pub fn ty(&self) -> Type {
        match self {
            LValue::Local(local) => local.ty.clone(),
            LValue::Array(array_ref) => array_ref.ty(),
            LValue::InstanceField(field_ref) => field_ref.field.ty().clone(),
            LValue::StaticField(field_ref) => field_ref.field.ty().clone(),
        }
    }

    /// Values read to locate the target, e.g. base and index of `a[i]`
    pub fn uses(&self) -> Vec<Value> {
        match self {
            LValue::Local(_) | LValue::StaticField(_) => Vec::new(),
            LValue::Array(array_ref) => array_ref.uses(),
            LValue::InstanceField(field_ref) => field_ref.uses(),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, LValue::Local(_))
    }
}

impl fmt::Display for LValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LValue::Local(local) => write!(f, "{local}"),
            LValue::Array(array_ref) => write!(f, "{array_ref}"),
            LValue::InstanceField(field_ref) => write!(f, "{field_ref}"),
            LValue::StaticField(field_ref) => write!(f, "{field_ref}"),
        }
    }
}

impl From<Local> for Immediate {
    fn from(local: Local) -> Self {
        Immediate::Local(local)
    }
}

impl From<Constant> for Immediate {
    fn from(constant: Constant) -> Self {
        Immediate::Constant(constant)
    }
}

impl From<Immediate> for Value {
    fn from(imm: Immediate) -> Self {
        Value::Immediate(imm)
    }
}

impl From<Local> for Value {
    fn from(local: Local) -> Self {
        Value::Immediate(Immediate::Local(local))
    }
}

impl From<Constant> for Value {
    fn from(constant: Constant) -> Self {
        Value::Immediate(Immediate::Constant(constant))
    }
}

impl From<Expr> for Value {
    fn from(expr: Expr) -> Self {
        Value::Expr(expr)
    }
}

impl From<BinopExpr> for Value {
    fn from(binop: BinopExpr) -> Self {
        Value::Expr(Expr::Binop(binop))
    }
}

impl From<InvokeExpr> for Value {
    fn from(invoke: InvokeExpr) -> Self {
        Value::Expr(Expr::Invoke(invoke))
    }
}

impl From<Ref> for Value {
    fn from(r: Ref) -> Self {
        Value::Ref(r)
    }
}

impl From<LValue> for Value {
    fn from(lvalue: LValue) -> Self {
        match lvalue {
            LValue::Local(local) => local.into(),
            LValue::Array(array_ref) => Value::Ref(Ref::Array(array_ref)),
            LValue::InstanceField(field_ref) => Value::Ref(Ref::InstanceField(field_ref)),
            LValue::StaticField(field_ref) => Value::Ref(Ref::StaticField(field_ref)),
        }
    }
}

impl From<Local> for LValue {
    fn from(local: Local) -> Self {
        LValue::Local(local)
    }
}

impl TryFrom<Value> for Immediate {
    type Error = IncompatibleUse;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Immediate(imm) => Ok(imm),
            other => Err(IncompatibleUse::new("operand", "an immediate", other)),
        }
    }
}

impl TryFrom<Value> for Local {
    type Error = IncompatibleUse;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Immediate(Immediate::Local(local)) => Ok(local),
            other => Err(IncompatibleUse::new("operand", "a local", other)),
        }
    }
}

impl TryFrom<Value> for LValue {
    type Error = IncompatibleUse;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Immediate(Immediate::Local(local)) => Ok(LValue::Local(local)),
            Value::Ref(Ref::Array(array_ref)) => Ok(LValue::Array(array_ref)),
            Value::Ref(Ref::InstanceField(field_ref)) => Ok(LValue::InstanceField(field_ref)),
            Value::Ref(Ref::StaticField(field_ref)) => Ok(LValue::StaticField(field_ref)),
            other => Err(IncompatibleUse::new("definition", "an assignable location", other)),
        }
    }
}

impl From<ArrayRef> for LValue {
    fn from(array_ref: ArrayRef) -> Self {
        LValue::Array(array_ref)
    }
}

impl From<InstanceFieldRef> for LValue {
    fn from(field_ref: InstanceFieldRef) -> Self {
        LValue::InstanceField(field_ref)
    }
}

impl From<StaticFieldRef> for LValue {
    fn from(field_ref: StaticFieldRef) -> Self {
        LValue::StaticField(field_ref)
    }
}

impl From<ArrayRef> for Value {
    fn from(array_ref: ArrayRef) -> Self {
        Value::Ref(Ref::Array(array_ref))
    }
}

impl From<InstanceFieldRef> for Value {
    fn from(field_ref: InstanceFieldRef) -> Self {
        Value::Ref(Ref::InstanceField(field_ref))
    }
}

impl From<StaticFieldRef> for Value {
    fn from(field_ref: StaticFieldRef) -> Self {
        Value::Ref(Ref::StaticField(field_ref))
    }
}
