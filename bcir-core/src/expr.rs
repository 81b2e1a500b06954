//! IR Expressions
//! 
//! Composite values over immediates. Expression types are always derived
//! from the current operands and never stored, so rebuilding an
//! expression with a new operand retypes it automatically.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::signature::MethodSignature;
use crate::types::{ClassType, NumericCategory, Type};
use crate::values::{Immediate, Local, Value};

/// Binary numeric promotion over two operand types
///
/// Rules apply in order: both int-like gives `int`, then any `double`,
/// then any `long`, then any `float`. Anything else is `Unknown`.
/// A `long`/`double` pair widens to `double`; a `long`/`float` pair
/// stays `long`.
pub fn binary_numeric_type(lhs: &Type, rhs: &Type) -> Type {
    use NumericCategory::*;

    let (l, r) = (lhs.numeric_category(), rhs.numeric_category());
    if l == IntLike && r == IntLike {
        Type::Int
    } else if l == Double || r == Double {
        Type::Double
    } else if l == Long || r == Long {
        Type::Long
    } else if l == Float || r == Float {
        Type::Float
    } else {
        Type::Unknown
    }
}

/// Unary numeric promotion, used for negation and shift amounts
pub fn unary_numeric_type(ty: &Type) -> Type {
    match ty.numeric_category() {
        NumericCategory::IntLike => Type::Int,
        NumericCategory::Long => Type::Long,
        NumericCategory::Float => Type::Float,
        NumericCategory::Double => Type::Double,
        NumericCategory::Other => Type::Unknown,
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinopOp {
    // Arithmetic
    Add, Sub, Mul, Div, Rem,

    // Bitwise
    And, Or, Xor,
    Shl, Shr, Ushr,

    // Three-way comparison (int result)
    Cmp, Cmpl, Cmpg,

    // Conditions (boolean result)
    Eq, Ne, Lt, Le, Gt, Ge,
}

impl BinopOp {
    pub fn is_condition(&self) -> bool {
        matches!(self, BinopOp::Eq | BinopOp::Ne | BinopOp::Lt | BinopOp::Le | BinopOp::Gt | BinopOp::Ge)
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinopOp::And | BinopOp::Or | BinopOp::Xor)
    }

    pub fn is_shift(&self) -> bool {
        matches!(self, BinopOp::Shl | BinopOp::Shr | BinopOp::Ushr)
    }
}

impl fmt::Display for BinopOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            BinopOp::Add => "+",
            BinopOp::Sub => "-",
            BinopOp::Mul => "*",
            BinopOp::Div => "/",
            BinopOp::Rem => "%",
            BinopOp::And => "&",
            BinopOp::Or => "|",
            BinopOp::Xor => "^",
            BinopOp::Shl => "<<",
            BinopOp::Shr => ">>",
            BinopOp::Ushr => ">>>",
            BinopOp::Cmp => "cmp",
            BinopOp::Cmpl => "cmpl",
            BinopOp::Cmpg => "cmpg",
            BinopOp::Eq => "==",
            BinopOp::Ne => "!=",
            BinopOp::Lt => "<",
            BinopOp::Le => "<=",
            BinopOp::Gt => ">",
            BinopOp::Ge => ">=",
        };
        write!(f, "{op_str}")
    }
}

/// `op1 op op2`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinopExpr {
    pub op: BinopOp,
    pub op1: Immediate,
    pub op2: Immediate,
}

impl BinopExpr {
    pub fn new(op: BinopOp, op1: impl Into<Immediate>, op2: impl Into<Immediate>) -> Self {
        Self {
            op,
            op1: op1.into(),
            op2: op2.into(),
        }
    }

    /// Result type, recomputed from the operands on every call
    pub fn ty(&self) -> Type {
        match self.op {
            op if op.is_condition() => Type::Boolean,
            BinopOp::Cmp | BinopOp::Cmpl | BinopOp::Cmpg => Type::Int,
            op if op.is_shift() => match unary_numeric_type(&self.op1.ty()) {
                ty @ (Type::Int | Type::Long) => ty,
                _ => Type::Unknown,
            },
            _ => binary_numeric_type(&self.op1.ty(), &self.op2.ty()),
        }
    }

    pub fn uses(&self) -> Vec<Value> {
        vec![self.op1.clone().into(), self.op2.clone().into()]
    }
}

impl fmt::Display for BinopExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.op1, self.op, self.op2)
    }
}

/// Dispatch kind of a method invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvokeKind {
    Static,
    Virtual,
    Special,
    Interface,
}

impl fmt::Display for InvokeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeKind::Static => write!(f, "staticinvoke"),
            InvokeKind::Virtual => write!(f, "virtualinvoke"),
            InvokeKind::Special => write!(f, "specialinvoke"),
            InvokeKind::Interface => write!(f, "interfaceinvoke"),
        }
    }
}

/// Method invocation; `base` is the receiver for non-static calls
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvokeExpr {
    pub kind: InvokeKind,
    pub method: MethodSignature,
    pub base: Option<Local>,
    pub args: Vec<Immediate>,
}

impl InvokeExpr {
    pub fn new_static(method: MethodSignature, args: Vec<Immediate>) -> Self {
        Self {
            kind: InvokeKind::Static,
            method,
            base: None,
            args,
        }
    }

    pub fn new_instance(kind: InvokeKind, base: Local, method: MethodSignature, args: Vec<Immediate>) -> Self {
        Self {
            kind,
            method,
            base: Some(base),
            args,
        }
    }

    pub fn ty(&self) -> Type {
        self.method.return_type().clone()
    }

    /// Receiver first, then arguments
    pub fn uses(&self) -> Vec<Value> {
        self.base
            .iter()
            .map(|base| Value::from(base.clone()))
            .chain(self.args.iter().map(|arg| Value::from(arg.clone())))
            .collect()
    }
}

impl fmt::Display for InvokeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.kind)?;
        if let Some(base) = &self.base {
            write!(f, "{base}.")?;
        }
        write!(f, "{}(", self.method)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

/// Expression value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Binop(BinopExpr),
    Neg(Immediate),
    Cast { op: Immediate, ty: Type },
    InstanceOf { op: Immediate, check: Type },
    Length(Immediate),
    New(ClassType),
    NewArray { element: Type, size: Immediate },
    Invoke(InvokeExpr),
}

impl Expr {
    pub fn ty(&self) -> Type {
        match self {
            Expr::Binop(binop) => binop.ty(),
            Expr::Neg(op) => unary_numeric_type(&op.ty()),
            Expr::Cast { ty, .. } => ty.clone(),
            Expr::InstanceOf { .. } => Type::Boolean,
            Expr::Length(_) => Type::Int,
            Expr::New(class) => Type::Class(class.clone()),
            Expr::NewArray { element, .. } => Type::array_of(element.clone()),
            Expr::Invoke(invoke) => invoke.ty(),
        }
    }

    /// Operands read by this expression, in evaluation order
    pub fn uses(&self) -> Vec<Value> {
        match self {
            Expr::Binop(binop) => binop.uses(),
            Expr::Neg(op)
            | Expr::Cast { op, .. }
            | Expr::InstanceOf { op, .. }
            | Expr::Length(op)
            | Expr::NewArray { size: op, .. } => vec![op.clone().into()],
            Expr::New(_) => Vec::new(),
            Expr::Invoke(invoke) => invoke.uses(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binop(binop) => write!(f, "{binop}"),
            Expr::Neg(op) => write!(f, "neg {op}"),
            Expr::Cast { op, ty } => write!(f, "({ty}) {op}"),
            Expr::InstanceOf { op, check } => write!(f, "{op} instanceof {check}"),
            Expr::Length(op) => write!(f, "lengthof {op}"),
            Expr::New(class) => write!(f, "new {class}"),
            Expr::NewArray { element, size } => write!(f, "newarray ({element})[{size}]"),
            Expr::Invoke(invoke) => write!(f, "{invoke}"),
        }
    }
}
