//! Constant values
//! 
//! Constants are immediates. Integer, long and boolean constants also
//! support logical combination through [`LogicalConstant`], which lets
//! folding passes combine them without knowing the concrete kind.

use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use crate::expr::BinopOp;
use crate::types::Type;

/// Constants that can be combined with `and`, `or` and `xor`
pub trait LogicalConstant: Sized {
    fn and(&self, other: &Self) -> Self;
    fn or(&self, other: &Self) -> Self;
    fn xor(&self, other: &Self) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntConstant(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LongConstant(pub i64);

/// Compared by bit pattern, so `0.0F != -0.0F` and `NaN == NaN`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FloatConstant(pub f32);

/// Compared by bit pattern, like [`FloatConstant`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DoubleConstant(pub f64);

impl PartialEq for FloatConstant {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatConstant {}

impl Hash for FloatConstant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialEq for DoubleConstant {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for DoubleConstant {}

impl Hash for DoubleConstant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BooleanConstant(pub bool);

impl LogicalConstant for IntConstant {
    fn and(&self, other: &Self) -> Self {
        IntConstant(self.0 & other.0)
    }

    fn or(&self, other: &Self) -> Self {
        IntConstant(self.0 | other.0)
    }

    fn xor(&self, other: &Self) -> Self {
        IntConstant(self.0 ^ other.0)
    }
}

impl LogicalConstant for LongConstant {
    fn and(&self, other: &Self) -> Self {
        LongConstant(self.0 & other.0)
    }

    fn or(&self, other: &Self) -> Self {
        LongConstant(self.0 | other.0)
    }

    fn xor(&self, other: &Self) -> Self {
        LongConstant(self.0 ^ other.0)
    }
}

impl LogicalConstant for BooleanConstant {
    fn and(&self, other: &Self) -> Self {
        BooleanConstant(self.0 && other.0)
    }

    fn or(&self, other: &Self) -> Self {
        BooleanConstant(self.0 || other.0)
    }

    fn xor(&self, other: &Self) -> Self {
        BooleanConstant(self.0 != other.0)
    }
}

/// Apply a logical operator through the capability
pub fn apply_logical<T: LogicalConstant>(op: BinopOp, lhs: &T, rhs: &T) -> Option<T> {
    match op {
        BinopOp::And => Some(lhs.and(rhs)),
        BinopOp::Or => Some(lhs.or(rhs)),
        BinopOp::Xor => Some(lhs.xor(rhs)),
        _ => None,
    }
}

/// Constant immediate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constant {
    Int(IntConstant),
    Long(LongConstant),
    Float(FloatConstant),
    Double(DoubleConstant),
    Boolean(BooleanConstant),
    Null,
    String(String),
    /// Class literal, e.g. `String.class`
    Class(Type),
}

impl Constant {
    pub fn int(value: i32) -> Self {
        Constant::Int(IntConstant(value))
    }

    pub fn long(value: i64) -> Self {
        Constant::Long(LongConstant(value))
    }

    pub fn float(value: f32) -> Self {
        Constant::Float(FloatConstant(value))
    }

    pub fn double(value: f64) -> Self {
        Constant::Double(DoubleConstant(value))
    }

    pub fn boolean(value: bool) -> Self {
        Constant::Boolean(BooleanConstant(value))
    }

    pub fn ty(&self) -> Type {
        match self {
            Constant::Int(_) => Type::Int,
            Constant::Long(_) => Type::Long,
            Constant::Float(_) => Type::Float,
            Constant::Double(_) => Type::Double,
            Constant::Boolean(_) => Type::Boolean,
            Constant::Null => Type::Null,
            Constant::String(_) => Type::class("java.lang.String"),
            Constant::Class(_) => Type::class("java.lang.Class"),
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Constant::Int(_) | Constant::Long(_) | Constant::Boolean(_))
    }
}

/// Fold `lhs op rhs` for logical operators over constants of the same kind
pub fn fold_logical(op: BinopOp, lhs: &Constant, rhs: &Constant) -> Option<Constant> {
    if !op.is_logical() {
        trace!("{op} is not a logical operator");
        return None;
    }
    let folded = match (lhs, rhs) {
        (Constant::Int(a), Constant::Int(b)) => apply_logical(op, a, b).map(Constant::Int),
        (Constant::Long(a), Constant::Long(b)) => apply_logical(op, a, b).map(Constant::Long),
        (Constant::Boolean(a), Constant::Boolean(b)) => {
            apply_logical(op, a, b).map(Constant::Boolean)
        }
        _ => None,
    };
    if folded.is_none() {
        trace!("not folding {lhs} {op} {rhs}");
    }
    folded
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(IntConstant(v)) => write!(f, "{v}"),
            Constant::Long(LongConstant(v)) => write!(f, "{v}L"),
            Constant::Float(FloatConstant(v)) => write!(f, "{v:?}F"),
            Constant::Double(DoubleConstant(v)) => write!(f, "{v:?}"),
            Constant::Boolean(BooleanConstant(v)) => write!(f, "{v}"),
            Constant::Null => write!(f, "null"),
            Constant::String(s) => write!(f, "{s:?}"),
            Constant::Class(ty) => write!(f, "class \"{ty}\""),
        }
    }
}
