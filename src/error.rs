use std::fmt;

/// Source location span for error reporting
/// Represents a range of bytes in the input string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position (0-indexed byte offset)
    pub start: usize,
    /// End position (exclusive, 0-indexed byte offset)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single position
    pub fn at(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Check if this span has valid location info
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Format the span for display (1-indexed for users)
    pub fn display(&self) -> String {
        if !self.is_valid() {
            String::new()
        } else if self.end - self.start == 1 {
            format!(" at position {}", self.start + 1)
        } else {
            format!(" at positions {}-{}", self.start + 1, self.end)
        }
    }
}

/// Which parser stack overflowed or underflowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackKind {
    Operand,
    Operator,
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackKind::Operand => write!(f, "operand"),
            StackKind::Operator => write!(f, "operator"),
        }
    }
}

/// Convenience result type for the text interface
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors produced while turning text into an expression
///
/// All of these describe bad input and are recoverable: a failed parse simply
/// produces no expression.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    // Lexing errors
    #[error("unexpected character '{ch}'{}", .span.display())]
    UnexpectedCharacter { ch: char, span: Span },

    #[error("unknown name '{name}'{}", .span.display())]
    UnknownName { name: String, span: Span },

    #[error("literal longer than {limit} characters{}", .span.display())]
    LiteralTooLong { limit: usize, span: Span },

    #[error("input too long: more than {limit} tokens")]
    TooLong { limit: usize },

    // Parsing errors
    #[error("end of expression unexpected")]
    UnexpectedEnd,

    #[error("expected: ), but got '{got}'{}", .span.display())]
    ExpectedCloseParen { got: String, span: Span },

    #[error("expected expression, but got '{got}'{}", .span.display())]
    ExpectedExpression { got: String, span: Span },

    #[error("unexpected '{got}' after complete expression{}", .span.display())]
    UnexpectedToken { got: String, span: Span },

    // Capacity limits
    #[error("{0} stack full")]
    StackFull(StackKind),

    #[error("{0} stack empty")]
    StackEmpty(StackKind),

    #[error("parentheses nested deeper than {limit} levels{}", .span.display())]
    TooDeep { limit: usize, span: Span },
}
