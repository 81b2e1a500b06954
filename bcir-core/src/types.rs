//! IR Type System
//! 
//! The types a bytecode value can carry, and the numeric categories used
//! for binary numeric promotion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully qualified class type, e.g. `java.lang.String`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassType {
    pub name: String,
}

impl ClassType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Package part of the name, empty for the default package
    pub fn package_name(&self) -> &str {
        self.name.rsplit_once('.').map_or("", |(package, _)| package)
    }

    /// Simple class name without the package
    pub fn class_name(&self) -> &str {
        self.name.rsplit_once('.').map_or(self.name.as_str(), |(_, class)| class)
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Array type: `dimension` levels of `[]` over a non-array base type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrayType {
    pub base: Box<Type>,
    pub dimension: u8,
}

/// IR Type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
    /// Type of the `null` constant
    Null,
    Class(ClassType),
    Array(ArrayType),
    /// Not yet inferred, or not representable in the lattice
    Unknown,
}

/// Coarse numeric classification used by binary numeric promotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericCategory {
    /// boolean, byte, char, short and int: all computed as 32-bit int
    IntLike,
    Long,
    Float,
    Double,
    /// Anything outside the numeric domain
    Other,
}

impl Type {
    pub fn class(name: impl Into<String>) -> Self {
        Type::Class(ClassType::new(name))
    }

    /// Build an array type, flattening nested arrays into one dimension count
    ///
    /// Past 255 dimensions the result is [`Type::Unknown`].
    pub fn array_of(element: Type) -> Self {
        match element {
            Type::Array(ArrayType { base, dimension }) => match dimension.checked_add(1) {
                Some(dimension) => Type::Array(ArrayType { base, dimension }),
                None => Type::Unknown,
            },
            base => Type::Array(ArrayType {
                base: Box::new(base),
                dimension: 1,
            }),
        }
    }

    pub fn numeric_category(&self) -> NumericCategory {
        match self {
            Type::Boolean | Type::Byte | Type::Char | Type::Short | Type::Int => {
                NumericCategory::IntLike
            }
            Type::Long => NumericCategory::Long,
            Type::Float => NumericCategory::Float,
            Type::Double => NumericCategory::Double,
            _ => NumericCategory::Other,
        }
    }

    pub fn is_int_like(&self) -> bool {
        self.numeric_category() == NumericCategory::IntLike
    }

    pub fn is_primitive(&self) -> bool {
        self.numeric_category() != NumericCategory::Other
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Type::Class(_) | Type::Array(_) | Type::Null)
    }

    /// Element type for arrays
    pub fn element_type(&self) -> Option<Type> {
        match self {
            Type::Array(ArrayType { base, dimension: 1 }) => Some((**base).clone()),
            Type::Array(ArrayType { base, dimension }) => {
                let dimension = dimension.checked_sub(1)?;
                Some(Type::Array(ArrayType { base: base.clone(), dimension }))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Boolean => write!(f, "boolean"),
            Type::Byte => write!(f, "byte"),
            Type::Char => write!(f, "char"),
            Type::Short => write!(f, "short"),
            Type::Int => write!(f, "int"),
            Type::Long => write!(f, "long"),
            Type::Float => write!(f, "float"),
            Type::Double => write!(f, "double"),
            Type::Void => write!(f, "void"),
            Type::Null => write!(f, "null_type"),
            Type::Class(class) => write!(f, "{class}"),
            Type::Array(ArrayType { base, dimension }) => {
                write!(f, "{base}")?;
                for _ in 0..*dimension {
                    write!(f, "[]")?;
                }
                Ok(())
            }
            Type::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_categories() {
        for ty in [Type::Boolean, Type::Byte, Type::Char, Type::Short, Type::Int] {
            assert_eq!(ty.numeric_category(), NumericCategory::IntLike, "{ty}");
        }
        assert_eq!(Type::Long.numeric_category(), NumericCategory::Long);
        assert_eq!(Type::Float.numeric_category(), NumericCategory::Float);
        assert_eq!(Type::Double.numeric_category(), NumericCategory::Double);
        assert_eq!(Type::class("java.lang.Integer").numeric_category(), NumericCategory::Other);
        assert_eq!(Type::Unknown.numeric_category(), NumericCategory::Other);
    }

    #[test]
    fn test_type_text() {
        assert_eq!(Type::Int.to_string(), "int");
        assert_eq!(Type::class("java.lang.String").to_string(), "java.lang.String");
        assert_eq!(Type::array_of(Type::array_of(Type::Int)).to_string(), "int[][]");
        assert_eq!(Type::Null.to_string(), "null_type");
    }

    #[test]
    fn test_array_element_type() {
        let matrix = Type::array_of(Type::array_of(Type::Long));
        assert_eq!(matrix.element_type(), Some(Type::array_of(Type::Long)));
        assert_eq!(Type::array_of(Type::Long).element_type(), Some(Type::Long));
        assert_eq!(Type::Long.element_type(), None);
    }

    #[test]
    fn test_array_dimension_limits() {
        let mut ty = Type::Int;
        for _ in 0..u8::MAX {
            ty = Type::array_of(ty);
        }
        assert!(matches!(&ty, Type::Array(ArrayType { dimension: 255, .. })));
        assert_eq!(Type::array_of(ty), Type::Unknown);

        let degenerate = Type::Array(ArrayType { base: Box::new(Type::Int), dimension: 0 });
        assert_eq!(degenerate.element_type(), None);
    }

    #[test]
    fn test_primitive_and_reference_kinds() {
        for ty in [Type::Boolean, Type::Char, Type::Long, Type::Double] {
            assert!(ty.is_primitive(), "{ty}");
            assert!(!ty.is_reference(), "{ty}");
        }
        for ty in [Type::class("java.lang.Object"), Type::array_of(Type::Int), Type::Null] {
            assert!(ty.is_reference(), "{ty}");
            assert!(!ty.is_primitive(), "{ty}");
        }
        assert!(!Type::Void.is_primitive());
        assert!(!Type::Unknown.is_reference());
    }

    #[test]
    fn test_class_name_parts() {
        let ty = ClassType::new("java.util.ArrayList");
        assert_eq!(ty.package_name(), "java.util");
        assert_eq!(ty.class_name(), "ArrayList");

        let ty = ClassType::new("Main");
        assert_eq!(ty.package_name(), "");
        assert_eq!(ty.class_name(), "Main");
    }
}
