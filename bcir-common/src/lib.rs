//! Bytecode IR - Common Types and Utilities
//! 
//! This crate contains the pieces shared by every part of the bytecode
//! IR: opaque statement positions, the identifier escaping rule used by
//! canonical text, and the error types for precondition faults and
//! rejected operand substitutions.

pub mod error;
pub mod escape;
pub mod position;

pub use error::{IncompatibleUse, IrFault};
pub use escape::{escape, is_keyword};
pub use position::Position;
