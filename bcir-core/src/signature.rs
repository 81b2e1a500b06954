//! Member signatures
//! 
//! A sub-signature identifies a field or method by name and type,
//! independent of the declaring class. It is the key class-member tables
//! are indexed and ordered by. Full signatures add the declaring class.

use bcir_common::escape;
use once_cell::race::OnceBox;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use crate::printer::StmtPrinter;
use crate::types::{ClassType, Type};

/// `(name, type)` identity shared by field and method sub-signatures
///
/// The canonical text is built on first request and kept for the life of
/// the instance. Concurrent first requests may each build it; the first
/// published copy wins and every caller sees that one.
#[derive(Serialize, Deserialize)]
pub struct SubSignature {
    name: String,
    ty: Type,
    #[serde(skip)]
    text: OnceBox<String>,
}

impl SubSignature {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            text: OnceBox::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// `"<type> <name>"`, both parts escaped
    pub fn canonical_text(&self) -> &str {
        self.text.get_or_init(|| {
            Box::new(format!("{} {}", escape(&self.ty.to_string()), escape(&self.name)))
        })
    }
}

impl Clone for SubSignature {
    fn clone(&self) -> Self {
        let text = OnceBox::new();
        if let Some(cached) = self.text.get() {
            let _ = text.set(Box::new(cached.clone()));
        }
        Self {
            name: self.name.clone(),
            ty: self.ty.clone(),
            text,
        }
    }
}

impl fmt::Debug for SubSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubSignature")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish()
    }
}

impl PartialEq for SubSignature {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ty == other.ty
    }
}

impl Eq for SubSignature {}

impl Hash for SubSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.ty.hash(state);
    }
}

impl Ord for SubSignature {
    /// By name, then by the type's text
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.ty.to_string().cmp(&other.ty.to_string()))
    }
}

impl PartialOrd for SubSignature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SubSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_text())
    }
}

/// Sub-signature of a field: its name and declared type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldSubSignature(SubSignature);

impl FieldSubSignature {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self(SubSignature::new(name, ty))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn ty(&self) -> &Type {
        self.0.ty()
    }

    pub fn sub_signature(&self) -> &SubSignature {
        &self.0
    }

    pub fn canonical_text(&self) -> &str {
        self.0.canonical_text()
    }

    pub fn render_to(&self, printer: &mut dyn StmtPrinter) {
        printer.type_signature(self.ty());
        printer.literal(" ");
        printer.identifier(self.name());
    }
}

impl fmt::Display for FieldSubSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_text())
    }
}

/// Sub-signature of a method: name, return type and parameter types
#[derive(Serialize, Deserialize)]
pub struct MethodSubSignature {
    base: SubSignature,
    parameter_types: Vec<Type>,
    #[serde(skip)]
    text: OnceBox<String>,
}

impl MethodSubSignature {
    pub fn new(name: impl Into<String>, parameter_types: Vec<Type>, return_type: Type) -> Self {
        Self {
            base: SubSignature::new(name, return_type),
            parameter_types,
            text: OnceBox::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.base.name()
    }

    pub fn return_type(&self) -> &Type {
        self.base.ty()
    }

    pub fn parameter_types(&self) -> &[Type] {
        &self.parameter_types
    }

    pub fn sub_signature(&self) -> &SubSignature {
        &self.base
    }

    /// `"<ret> <name>(<p1>,<p2>)"`
    pub fn canonical_text(&self) -> &str {
        self.text.get_or_init(|| {
            let params = self
                .parameter_types
                .iter()
                .map(|ty| escape(&ty.to_string()).into_owned())
                .collect::<Vec<_>>()
                .join(",");
            Box::new(format!("{}({})", self.base.canonical_text(), params))
        })
    }

    pub fn render_to(&self, printer: &mut dyn StmtPrinter) {
        printer.type_signature(self.return_type());
        printer.literal(" ");
        printer.identifier(self.name());
        printer.literal("(");
        for (i, ty) in self.parameter_types.iter().enumerate() {
            if i > 0 { printer.literal(","); }
            printer.type_signature(ty);
        }
        printer.literal(")");
    }
}

impl Clone for MethodSubSignature {
    fn clone(&self) -> Self {
        let text = OnceBox::new();
        if let Some(cached) = self.text.get() {
            let _ = text.set(Box::new(cached.clone()));
        }
        Self {
            base: self.base.clone(),
            parameter_types: self.parameter_types.clone(),
            text,
        }
    }
}

impl fmt::Debug for MethodSubSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodSubSignature")
            .field("name", &self.base.name)
            .field("parameter_types", &self.parameter_types)
            .field("return_type", &self.base.ty)
            .finish()
    }
}

impl PartialEq for MethodSubSignature {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.parameter_types == other.parameter_types
    }
}

impl Eq for MethodSubSignature {}

impl Hash for MethodSubSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
        self.parameter_types.hash(state);
    }
}

impl Ord for MethodSubSignature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.base.cmp(&other.base).then_with(|| {
            self.parameter_types
                .iter()
                .map(ToString::to_string)
                .cmp(other.parameter_types.iter().map(ToString::to_string))
        })
    }
}

impl PartialOrd for MethodSubSignature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MethodSubSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_text())
    }
}

/// Field signature: `<declaring.Class: type name>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSignature {
    pub declaring_class: ClassType,
    pub sub: FieldSubSignature,
}

impl FieldSignature {
    pub fn new(declaring_class: ClassType, name: impl Into<String>, ty: Type) -> Self {
        Self {
            declaring_class,
            sub: FieldSubSignature::new(name, ty),
        }
    }

    pub fn name(&self) -> &str {
        self.sub.name()
    }

    pub fn ty(&self) -> &Type {
        self.sub.ty()
    }
}

impl fmt::Display for FieldSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {}>", self.declaring_class, self.sub)
    }
}

/// Method signature: `<declaring.Class: ret name(params)>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSignature {
    pub declaring_class: ClassType,
    pub sub: MethodSubSignature,
}

impl MethodSignature {
    pub fn new(
        declaring_class: ClassType,
        name: impl Into<String>,
        parameter_types: Vec<Type>,
        return_type: Type,
    ) -> Self {
        Self {
            declaring_class,
            sub: MethodSubSignature::new(name, parameter_types, return_type),
        }
    }

    pub fn name(&self) -> &str {
        self.sub.name()
    }

    pub fn return_type(&self) -> &Type {
        self.sub.return_type()
    }

    pub fn parameter_types(&self) -> &[Type] {
        self.sub.parameter_types()
    }

    /// Static and instance initializers
    pub fn is_initializer(&self) -> bool {
        matches!(self.name(), "<init>" | "<clinit>")
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {}>", self.declaring_class, self.sub)
    }
}
