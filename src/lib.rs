#![allow(clippy::module_inception)]

use std::rc::Rc;

pub mod ast;
pub mod errors;
pub mod macros;
pub mod type_checker;

pub use type_checker::type_checker::perform_type_checking;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }

    /// Span covering `self` through `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{Position, Span};

    #[test]
    fn test_span_to() {
        let file = Rc::new(String::from("test.lang"));
        let left = Span {
            start: Position(2, Rc::clone(&file)),
            end: Position(5, Rc::clone(&file)),
        };
        let right = Span {
            start: Position(8, Rc::clone(&file)),
            end: Position(12, Rc::clone(&file)),
        };

        let joined = left.to(&right);
        assert_eq!(joined.start.0, 2);
        assert_eq!(joined.end.0, 12);
    }

    #[test]
    fn test_null_span() {
        assert_eq!(Span::null().start, Position::null());
    }
}
