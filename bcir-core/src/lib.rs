//! Statement/expression IR for bytecode analysis
//! 
//! A three-address IR: statements reference typed operands, expose the
//! values they use and define, and can be rebuilt with an operand
//! substituted. Member sub-signatures give fields and methods a
//! comparable, hashable identity.
//! 
//! ## Architecture
//! 
//! - `types` - Type lattice and numeric categories
//! - `constants` - Constant immediates and the logical-operation capability
//! - `values` - Locals, immediates, values and assignable locations
//! - `expr` - Expressions and binary numeric promotion
//! - `refs` - Array, field and identity references
//! - `stmt` - The statement contract and statement kinds
//! - `rewrite` - Statement visitors and use substitution
//! - `signature` - Field/method sub-signatures and signatures
//! - `printer` - Printer capability for member rendering

pub use bcir_common::{IncompatibleUse, IrFault, Position};

pub use self::types::{ArrayType, ClassType, NumericCategory, Type};
pub use self::constants::{
    fold_logical, BooleanConstant, Constant, DoubleConstant, FloatConstant, IntConstant,
    LogicalConstant, LongConstant,
};
pub use self::values::{Immediate, LValue, Local, Value};
pub use self::expr::{binary_numeric_type, BinopExpr, BinopOp, Expr, InvokeExpr, InvokeKind};
pub use self::refs::{ArrayRef, FieldRef, IdentityRef, InstanceFieldRef, Ref, StaticFieldRef};
pub use self::stmt::{
    AssignStmt, EnterMonitorStmt, ExitMonitorStmt, GotoStmt, IdentityStmt, IfStmt,
    InvokableStmt, InvokeStmt, NopStmt, ReturnStmt, ReturnVoidStmt, Statement, Stmt,
    SwitchStmt, ThrowStmt,
};
pub use self::rewrite::{Rewrite, StmtVisitor, UseReplacer};
pub use self::signature::{
    FieldSignature, FieldSubSignature, MethodSignature, MethodSubSignature, SubSignature,
};
pub use self::printer::{StmtPrinter, TextPrinter};

pub mod types;
pub mod constants;
pub mod values;
pub mod expr;
pub mod refs;
pub mod stmt;
pub mod rewrite;
pub mod signature;
pub mod printer;
