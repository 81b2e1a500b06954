//! Source position tracking for IR statements
//! 
//! Statements carry the position of the bytecode they were built from.
//! The IR never interprets it, it only passes it through to rebuilt
//! statements and diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A range of source lines/columns (1-based); zero means "unknown"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub first_line: u32,
    pub first_column: u32,
    pub last_line: u32,
    pub last_column: u32,
}

impl Position {
    pub fn new(first_line: u32, first_column: u32, last_line: u32, last_column: u32) -> Self {
        Self {
            first_line,
            first_column,
            last_line,
            last_column,
        }
    }

    /// Position covering a single line, as reported by a line number table
    pub fn line(line: u32) -> Self {
        Self::new(line, 0, line, 0)
    }

    /// Position for synthesized statements
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.first_line == 0 && self.last_line == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "<no position>")
        } else if self.first_line == self.last_line {
            if self.first_column == self.last_column {
                write!(f, "{}", self.first_line)
            } else {
                write!(f, "{}:{}-{}", self.first_line, self.first_column, self.last_column)
            }
        } else {
            write!(
                f,
                "{}:{}-{}:{}",
                self.first_line, self.first_column, self.last_line, self.last_column
            )
        }
    }
}
