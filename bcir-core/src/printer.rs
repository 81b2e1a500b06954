//! Printer capability for member signatures
//! 
//! Members render themselves piecewise so that a printer can decide how
//! types and identifiers appear (qualified, abbreviated, escaped).

use bcir_common::escape;
use crate::types::Type;

pub trait StmtPrinter {
    /// Raw syntax such as separators and parentheses
    fn literal(&mut self, text: &str);

    fn type_signature(&mut self, ty: &Type);

    /// Member or local name
    fn identifier(&mut self, name: &str);
}

/// Collects canonical text into a string
#[derive(Debug, Default)]
pub struct TextPrinter {
    out: String,
}

impl TextPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl StmtPrinter for TextPrinter {
    fn literal(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn type_signature(&mut self, ty: &Type) {
        self.out.push_str(&escape(&ty.to_string()));
    }

    fn identifier(&mut self, name: &str) {
        self.out.push_str(&escape(name));
    }
}
