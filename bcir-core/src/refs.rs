//! Memory and identity references
//! 
//! Array elements, instance and static fields, and the identity refs
//! (`@this`, `@parameterN`, `@caughtexception`) bound at method entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::signature::FieldSignature;
use crate::types::Type;
use crate::values::{Immediate, Local, Value};

/// `base[index]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrayRef {
    pub base: Local,
    pub index: Immediate,
}

impl ArrayRef {
    pub fn new(base: Local, index: impl Into<Immediate>) -> Self {
        Self {
            base,
            index: index.into(),
        }
    }

    /// Element type of the base array, unknown when the base is not an array
    pub fn ty(&self) -> Type {
        self.base.ty.element_type().unwrap_or(Type::Unknown)
    }

    pub fn uses(&self) -> Vec<Value> {
        vec![self.base.clone().into(), self.index.clone().into()]
    }
}

impl fmt::Display for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.base, self.index)
    }
}

/// `base.<field>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceFieldRef {
    pub base: Local,
    pub field: FieldSignature,
}

impl InstanceFieldRef {
    pub fn new(base: Local, field: FieldSignature) -> Self {
        Self { base, field }
    }

    pub fn uses(&self) -> Vec<Value> {
        vec![self.base.clone().into()]
    }
}

impl fmt::Display for InstanceFieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.base, self.field)
    }
}

/// `<field>` of a class
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaticFieldRef {
    pub field: FieldSignature,
}

impl StaticFieldRef {
    pub fn new(field: FieldSignature) -> Self {
        Self { field }
    }
}

impl fmt::Display for StaticFieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field)
    }
}

/// Borrowed view over either kind of field reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRef<'a> {
    Instance(&'a InstanceFieldRef),
    Static(&'a StaticFieldRef),
}

impl<'a> FieldRef<'a> {
    pub fn field(&self) -> &'a FieldSignature {
        match self {
            FieldRef::Instance(field_ref) => &field_ref.field,
            FieldRef::Static(field_ref) => &field_ref.field,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, FieldRef::Static(_))
    }
}

/// Right-hand side of an identity statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityRef {
    This(Type),
    Parameter { index: usize, ty: Type },
    CaughtException(Type),
}

impl IdentityRef {
    pub fn ty(&self) -> Type {
        match self {
            IdentityRef::This(ty) | IdentityRef::CaughtException(ty) => ty.clone(),
            IdentityRef::Parameter { ty, .. } => ty.clone(),
        }
    }
}

impl fmt::Display for IdentityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityRef::This(ty) => write!(f, "@this: {ty}"),
            IdentityRef::Parameter { index, ty } => write!(f, "@parameter{index}: {ty}"),
            IdentityRef::CaughtException(ty) => write!(f, "@caughtexception: {ty}"),
        }
    }
}

/// Reference value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ref {
    Array(ArrayRef),
    InstanceField(InstanceFieldRef),
    StaticField(StaticFieldRef),
    Identity(IdentityRef),
}

impl Ref {
    pub fn ty(&self) -> Type {
        match self {
            Ref::Array(array_ref) => array_ref.ty(),
            Ref::InstanceField(field_ref) => field_ref.field.ty().clone(),
            Ref::StaticField(field_ref) => field_ref.field.ty().clone(),
            Ref::Identity(identity) => identity.ty(),
        }
    }

    pub fn uses(&self) -> Vec<Value> {
        match self {
            Ref::Array(array_ref) => array_ref.uses(),
            Ref::InstanceField(field_ref) => field_ref.uses(),
            Ref::StaticField(_) | Ref::Identity(_) => Vec::new(),
        }
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ref::Array(array_ref) => write!(f, "{array_ref}"),
            Ref::InstanceField(field_ref) => write!(f, "{field_ref}"),
            Ref::StaticField(field_ref) => write!(f, "{field_ref}"),
            Ref::Identity(identity) => write!(f, "{identity}"),
        }
    }
}
