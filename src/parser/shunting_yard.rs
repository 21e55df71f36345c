//! Operator-precedence parsing with explicit operand and operator stacks
//!
//! Parenthesized groups are parsed by recursion, but every level shares the same
//! two stacks. Each level pushes a marker onto the operator stack on entry and
//! drains down to it on exit, so nesting relies only on LIFO discipline.

use crate::error::{ParseError, StackKind};
use crate::parser::tokens::{Operator, Token, TokenKind};
use crate::Expr;

/// Entry on the operator stack
#[derive(Debug, Clone, Copy, PartialEq)]
enum StackEntry {
    /// Bottom of the current nesting level; never reduced
    Marker,
    Op(Operator),
}

impl StackEntry {
    fn precedence(self) -> i8 {
        match self {
            StackEntry::Marker => -1,
            StackEntry::Op(op) => op.precedence(),
        }
    }
}

/// Parse a complete token sequence into one expression
///
/// Fails if any token is left over once the top-level expression is complete.
pub(crate) fn parse_tokens(
    tokens: &[Token],
    capacity: usize,
    max_depth: usize,
) -> Result<Expr, ParseError> {
    let mut parser = ShuntingYard::new(tokens, capacity, max_depth);
    parser.parse()?;

    if let Some(token) = parser.current() {
        return Err(ParseError::UnexpectedToken {
            got: token.to_user_string(),
            span: token.span,
        });
    }
    parser.pop_operand()
}

/// State for one top-level parse, threaded through the recursion
struct ShuntingYard<'a> {
    tokens: &'a [Token],
    pos: usize,
    operands: Vec<Expr>,
    operators: Vec<StackEntry>,
    capacity: usize,
    /// Open parenthesized groups, one native `parse` frame each
    depth: usize,
    max_depth: usize,
}

impl<'a> ShuntingYard<'a> {
    fn new(tokens: &'a [Token], capacity: usize, max_depth: usize) -> Self {
        ShuntingYard {
            tokens,
            pos: 0,
            operands: Vec::new(),
            operators: Vec::new(),
            capacity,
            depth: 0,
            max_depth,
        }
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn push_operator(&mut self, entry: StackEntry) -> Result<(), ParseError> {
        if self.operators.len() >= self.capacity {
            return Err(ParseError::StackFull(StackKind::Operator));
        }
        self.operators.push(entry);
        Ok(())
    }

    fn top_operator(&self) -> Result<StackEntry, ParseError> {
        self.operators
            .last()
            .copied()
            .ok_or(ParseError::StackEmpty(StackKind::Operator))
    }

    fn pop_operator(&mut self) -> Result<StackEntry, ParseError> {
        self.operators
            .pop()
            .ok_or(ParseError::StackEmpty(StackKind::Operator))
    }

    fn push_operand(&mut self, expr: Expr) -> Result<(), ParseError> {
        if self.operands.len() >= self.capacity {
            return Err(ParseError::StackFull(StackKind::Operand));
        }
        self.operands.push(expr);
        Ok(())
    }

    fn pop_operand(&mut self) -> Result<Expr, ParseError> {
        self.operands
            .pop()
            .ok_or(ParseError::StackEmpty(StackKind::Operand))
    }

    /// Pop one operator and its operands, push the combined node
    fn reduce(&mut self) -> Result<(), ParseError> {
        let op = match self.pop_operator()? {
            StackEntry::Op(op) => op,
            // Draining stops at the marker, so reaching it here is a stack imbalance
            StackEntry::Marker => return Err(ParseError::StackEmpty(StackKind::Operator)),
        };

        let node = if let Some(bin) = op.binary_op() {
            let right = self.pop_operand()?;
            let left = self.pop_operand()?;
            Expr::binary(bin, left, right)
        } else if let Some(un) = op.unary_op() {
            let operand = self.pop_operand()?;
            Expr::unary(un, operand)
        } else {
            unreachable!("every operator is either binary or unary")
        };

        self.push_operand(node)
    }

    /// Reduce everything binding at least as tightly as `op`, then push it
    fn reduce_and_push(&mut self, op: Operator) -> Result<(), ParseError> {
        while op.precedence() <= self.top_operator()?.precedence() {
            self.reduce()?;
        }
        self.push_operator(StackEntry::Op(op))
    }

    /// Parse one nesting level, leaving its value on the operand stack
    fn parse(&mut self) -> Result<(), ParseError> {
        self.push_operator(StackEntry::Marker)?;

        loop {
            let token = self.current().ok_or(ParseError::UnexpectedEnd)?;

            match token.kind {
                TokenKind::Number(n) => {
                    self.push_operand(Expr::number(n))?;
                    self.advance();
                }
                TokenKind::LeftParen => {
                    if self.depth >= self.max_depth {
                        return Err(ParseError::TooDeep {
                            limit: self.max_depth,
                            span: token.span,
                        });
                    }
                    self.advance();
                    self.depth += 1;
                    self.parse()?;
                    self.depth -= 1;
                    match self.current() {
                        Some(Token {
                            kind: TokenKind::RightParen,
                            ..
                        }) => self.advance(),
                        Some(other) => {
                            return Err(ParseError::ExpectedCloseParen {
                                got: other.to_user_string(),
                                span: other.span,
                            });
                        }
                        None => return Err(ParseError::UnexpectedEnd),
                    }
                }
                TokenKind::Operator(op) if op.is_unary() => {
                    self.push_operator(StackEntry::Op(op))?;
                    self.advance();
                    continue;
                }
                // A minus where an operand is expected is a negation
                TokenKind::Operator(Operator::Sub) => {
                    self.push_operator(StackEntry::Op(Operator::Neg))?;
                    self.advance();
                    continue;
                }
                _ => {
                    return Err(ParseError::ExpectedExpression {
                        got: token.to_user_string(),
                        span: token.span,
                    });
                }
            }

            match self.current() {
                Some(Token {
                    kind: TokenKind::Operator(op),
                    ..
                }) if op.binary_op().is_some() => {
                    self.reduce_and_push(*op)?;
                    self.advance();
                }
                _ => break,
            }
        }

        while self.top_operator()? != StackEntry::Marker {
            self.reduce()?;
        }
        // discard the marker
        self.pop_operator()?;
        Ok(())
    }
}
