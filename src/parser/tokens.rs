use crate::ast::{BinaryOp, UnaryOp};
use crate::error::Span;

/// Operators recognized in text
///
/// `Neg` is never produced by the lexer: the parser retags a `Sub` found where
/// an operand was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Sqrt,
}

impl Operator {
    pub(crate) fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    pub(crate) fn is_unary(self) -> bool {
        matches!(self, Operator::Neg | Operator::Sqrt)
    }

    pub(crate) fn precedence(self) -> i8 {
        match self {
            Operator::Neg | Operator::Sqrt => 30,
            Operator::Mul | Operator::Div => 20,
            Operator::Add | Operator::Sub => 10,
        }
    }

    /// Node operator a binary token reduces to
    pub(crate) fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Operator::Add => Some(BinaryOp::Add),
            Operator::Sub => Some(BinaryOp::Sub),
            Operator::Mul => Some(BinaryOp::Mul),
            Operator::Div => Some(BinaryOp::Div),
            Operator::Neg | Operator::Sqrt => None,
        }
    }

    /// Node operator a unary token reduces to
    pub(crate) fn unary_op(self) -> Option<UnaryOp> {
        match self {
            Operator::Neg => Some(UnaryOp::Neg),
            Operator::Sqrt => Some(UnaryOp::Sqrt),
            _ => None,
        }
    }

    pub(crate) fn to_name(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub | Operator::Neg => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Sqrt => "sqrt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TokenKind {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Text shown to users in error messages
    pub(crate) fn to_user_string(&self) -> String {
        match self.kind {
            TokenKind::Number(n) => n.to_string(),
            TokenKind::Operator(op) => op.to_name().to_string(),
            TokenKind::LeftParen => "(".to_string(),
            TokenKind::RightParen => ")".to_string(),
        }
    }
}
