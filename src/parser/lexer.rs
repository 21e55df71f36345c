use crate::error::{ParseError, Span};
use crate::parser::tokens::{Operator, Token, TokenKind};

/// Bounds applied while scanning
#[derive(Debug, Clone, Copy)]
pub(crate) struct LexLimits {
    pub(crate) max_tokens: usize,
    pub(crate) max_literal_len: usize,
}

/// Characters allowed inside an identifier after the first one
fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Value of a run of digits and dots, read the way C's `atof` would:
/// the longest numeric prefix counts, anything after a second `.` is ignored
/// and a run without digits reads as zero.
fn literal_value(run: &str) -> f64 {
    let end = run
        .char_indices()
        .filter(|&(_, c)| c == '.')
        .nth(1)
        .map_or(run.len(), |(i, _)| i);
    let prefix = &run[..end];
    if prefix.bytes().any(|b| b.is_ascii_digit()) {
        prefix.parse().unwrap_or(0.0)
    } else {
        0.0
    }
}

/// Single left-to-right scan of `input` into tokens
pub(crate) fn lex(input: &str, limits: &LexLimits) -> Result<Vec<Token>, ParseError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::with_capacity(input.len().min(limits.max_tokens) / 2 + 1);
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i];
        let start = i;

        // Vertical tab counts as blank too, like C `isspace`
        if c.is_ascii_whitespace() || c == 0x0b {
            i += 1;
            continue;
        }

        if tokens.len() >= limits.max_tokens {
            return Err(ParseError::TooLong {
                limit: limits.max_tokens,
            });
        }

        if c.is_ascii_digit() || c == b'.' {
            // Number literal
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            let span = Span::new(start, i);
            if i - start > limits.max_literal_len {
                return Err(ParseError::LiteralTooLong {
                    limit: limits.max_literal_len,
                    span,
                });
            }
            let value = literal_value(&input[start..i]);
            tokens.push(Token::new(TokenKind::Number(value), span));
        } else if c.is_ascii_alphabetic() || c == b'_' {
            // Name
            while i < bytes.len() && is_name_char(bytes[i]) {
                i += 1;
            }
            let span = Span::new(start, i);
            if i - start > limits.max_literal_len {
                return Err(ParseError::LiteralTooLong {
                    limit: limits.max_literal_len,
                    span,
                });
            }
            match &input[start..i] {
                "sqrt" => tokens.push(Token::new(TokenKind::Operator(Operator::Sqrt), span)),
                name => {
                    return Err(ParseError::UnknownName {
                        name: name.to_string(),
                        span,
                    });
                }
            }
        } else if c == b'(' || c == b')' {
            let kind = if c == b'(' {
                TokenKind::LeftParen
            } else {
                TokenKind::RightParen
            };
            i += 1;
            tokens.push(Token::new(kind, Span::at(start)));
        } else if let Some(op) = Operator::from_char(c as char) {
            i += 1;
            tokens.push(Token::new(TokenKind::Operator(op), Span::at(start)));
        } else {
            // Report the whole character, which may be multi-byte
            let ch = input[start..].chars().next().unwrap_or(c as char);
            return Err(ParseError::UnexpectedCharacter {
                ch,
                span: Span::new(start, start + ch.len_utf8()),
            });
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: LexLimits = LexLimits {
        max_tokens: 1024,
        max_literal_len: 30,
    };

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input, &LIMITS)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_lex_numbers() {
        assert_eq!(kinds("42"), vec![TokenKind::Number(42.0)]);
        assert_eq!(kinds("3.25"), vec![TokenKind::Number(3.25)]);
        assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
        assert_eq!(kinds("5."), vec![TokenKind::Number(5.0)]);
    }

    #[test]
    fn test_lex_numbers_like_atof() {
        assert_eq!(kinds("1.2.3"), vec![TokenKind::Number(1.2)]);
        assert_eq!(kinds("."), vec![TokenKind::Number(0.0)]);
        assert_eq!(kinds(".."), vec![TokenKind::Number(0.0)]);
    }

    #[test]
    fn test_lex_operators_and_parens() {
        assert_eq!(
            kinds(" ( 1+2 ) *-/ "),
            vec![
                TokenKind::LeftParen,
                TokenKind::Number(1.0),
                TokenKind::Operator(Operator::Add),
                TokenKind::Number(2.0),
                TokenKind::RightParen,
                TokenKind::Operator(Operator::Mul),
                TokenKind::Operator(Operator::Sub),
                TokenKind::Operator(Operator::Div),
            ]
        );
    }

    #[test]
    fn test_lex_sqrt() {
        assert_eq!(
            kinds("sqrt(2)"),
            vec![
                TokenKind::Operator(Operator::Sqrt),
                TokenKind::LeftParen,
                TokenKind::Number(2.0),
                TokenKind::RightParen,
            ]
        );
    }

    #[test]
    fn test_lex_spans() {
        let tokens = lex("12 + sqrt", &LIMITS).unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::at(3));
        assert_eq!(tokens[2].span, Span::new(5, 9));
    }

    #[test]
    fn test_lex_unknown_name() {
        let err = lex("2 * foo_1", &LIMITS).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownName {
                name: "foo_1".to_string(),
                span: Span::new(4, 9),
            }
        );
    }

    #[test]
    fn test_lex_unexpected_character() {
        assert!(matches!(
            lex("2 ^ 3", &LIMITS),
            Err(ParseError::UnexpectedCharacter { ch: '^', .. })
        ));
        assert!(matches!(
            lex("2 ° 3", &LIMITS),
            Err(ParseError::UnexpectedCharacter { ch: '°', .. })
        ));
    }

    #[test]
    fn test_lex_literal_too_long() {
        let long = "1".repeat(31);
        assert!(matches!(
            lex(&long, &LIMITS),
            Err(ParseError::LiteralTooLong { limit: 30, .. })
        ));
        assert!(lex(&"1".repeat(30), &LIMITS).is_ok());
    }

    #[test]
    fn test_lex_too_many_tokens() {
        let limits = LexLimits {
            max_tokens: 3,
            max_literal_len: 30,
        };
        assert!(lex("1+2", &limits).is_ok());
        assert_eq!(
            lex("1+2+3", &limits),
            Err(ParseError::TooLong { limit: 3 })
        );
    }

    #[test]
    fn test_lex_empty() {
        assert!(kinds("   ").is_empty());
    }

    #[test]
    fn test_lex_skips_every_blank() {
        assert_eq!(
            kinds("\t1\x0b+\x0c2\r\n"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Operator(Operator::Add),
                TokenKind::Number(2.0),
            ]
        );
    }
}
