//! Type representations carried by checked expressions.
//!
//! Types are plain values. The statement checker only ever asks two
//! questions of them: is this an lvalue wrapper, and is this a function.
//! Everything else (equality, coercion) is answered by the expression
//! checker.

use std::fmt::Display;

/// Signature of a function value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    pub params: Vec<Type>,
    pub result: Box<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Fixed-width builtin integer. `Integer(1)` is the boolean type.
    Integer(u32),
    /// Tuple of element types; the empty tuple is the unit type.
    Tuple(Vec<Type>),
    Function(FunctionType),
    /// An assignable storage location holding a value of the object type.
    LValue(Box<Type>),
}

impl Type {
    pub fn unit() -> Self {
        Type::Tuple(vec![])
    }

    pub fn function(params: Vec<Type>, result: Type) -> Self {
        Type::Function(FunctionType {
            params,
            result: Box::new(result),
        })
    }

    pub fn lvalue(object: Type) -> Self {
        Type::LValue(Box::new(object))
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Type::Tuple(elements) if elements.is_empty())
    }

    pub fn is_lvalue(&self) -> bool {
        matches!(self, Type::LValue(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Integer(_))
    }

    /// Object type of an lvalue wrapper, if this is one.
    pub fn lvalue_object(&self) -> Option<&Type> {
        match self {
            Type::LValue(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(function) => Some(function),
            _ => None,
        }
    }

    /// The type with any lvalue wrapper removed.
    pub fn rvalue(&self) -> &Type {
        self.lvalue_object().unwrap_or(self)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Integer(bits) => write!(f, "Int{}", bits),
            Type::Tuple(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, ")")
            }
            Type::Function(function) => {
                write!(f, "(")?;
                for (i, param) in function.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") -> {}", function.result)
            }
            Type::LValue(object) => write!(f, "@lvalue {}", object),
        }
    }
}
