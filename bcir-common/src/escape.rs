//! Identifier escaping for canonical IR text
//! 
//! Names coming out of class files may collide with words of the textual
//! IR or contain characters the textual syntax cannot carry. Such names
//! are single-quoted; everything else passes through untouched.

use std::borrow::Cow;
use std::fmt::Write;

/// Statement, expression and modifier words of the textual IR
const KEYWORDS: &[&str] = &[
    "abstract", "annotation", "breakpoint", "case", "catch", "class", "cmp", "cmpg",
    "cmpl", "default", "dynamicinvoke", "entermonitor", "enum", "exitmonitor", "extends",
    "final", "from", "goto", "if", "implements", "instanceof", "interface",
    "interfaceinvoke", "lengthof", "lookupswitch", "native", "new", "newarray",
    "newmultiarray", "nop", "null", "private", "protected", "public", "return",
    "specialinvoke", "static", "staticinvoke", "strictfp", "synchronized", "tableswitch",
    "throw", "throws", "to", "transient", "virtualinvoke", "volatile", "with",
];

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.binary_search(&name).is_ok()
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '<' | '>' | '[' | ']')
}

fn needs_quoting(name: &str) -> bool {
    match name.chars().next() {
        None => true,
        Some(first) if first.is_ascii_digit() => true,
        Some(_) => is_keyword(name) || !name.chars().all(is_safe_char),
    }
}

/// Escape a name for use in canonical text
pub fn escape(name: &str) -> Cow<'_, str> {
    if !needs_quoting(name) {
        return Cow::Borrowed(name);
    }

    let mut out = String::with_capacity(name.len() + 2);
    out.push('\'');
    for c in name.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            c if c.is_ascii_graphic() || c == ' ' => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    // Writing to a String cannot fail
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
        }
    }
    out.push('\'');
    Cow::Owned(out)
}
