use crate::error::ExprError;
use std::fmt;

/// A single lexical token with the byte position it started at.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    True,
    False,
    Null,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,

    AndAnd,
    OrOr,

    EqEq,
    BangEq,
    Greater,
    GreaterEq,
    Smaller,
    SmallerEq,

    LParen,
    RParen,
    LBracket,
    RBracket,
    Dot,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Str(s) => write!(f, "'{}'", s),
            Token::Ident(name) => write!(f, "{}", name),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Null => write!(f, "null"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Bang => write!(f, "!"),
            Token::AndAnd => write!(f, "&&"),
            Token::OrOr => write!(f, "||"),
            Token::EqEq => write!(f, "=="),
            Token::BangEq => write!(f, "!="),
            Token::Greater => write!(f, ">"),
            Token::GreaterEq => write!(f, ">="),
            Token::Smaller => write!(f, "<"),
            Token::SmallerEq => write!(f, "<="),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Dot => write!(f, "."),
        }
    }
}

/// Splits an expression string into tokens.
///
/// The grammar is deliberately tiny: numbers, single- or double-quoted
/// strings, identifiers, and the operator set the parser understands.
/// Anything else is an immediate, position-carrying error.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, ExprError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let position = i;

        match c {
            ' ' | '\t' | '\n' | '\r' => {
                i += 1;
                continue;
            }
            '(' => tokens.push(spanned(Token::LParen, position)),
            ')' => tokens.push(spanned(Token::RParen, position)),
            '[' => tokens.push(spanned(Token::LBracket, position)),
            ']' => tokens.push(spanned(Token::RBracket, position)),
            '.' => tokens.push(spanned(Token::Dot, position)),
            '+' => tokens.push(spanned(Token::Plus, position)),
            '-' => tokens.push(spanned(Token::Minus, position)),
            '*' => tokens.push(spanned(Token::Star, position)),
            '/' => tokens.push(spanned(Token::Slash, position)),
            '%' => tokens.push(spanned(Token::Percent, position)),
            '&' => {
                if chars.get(i + 1) == Some(&'&') {
                    tokens.push(spanned(Token::AndAnd, position));
                    i += 1;
                } else {
                    return Err(ExprError::UnexpectedChar { found: c, position });
                }
            }
            '|' => {
                if chars.get(i + 1) == Some(&'|') {
                    tokens.push(spanned(Token::OrOr, position));
                    i += 1;
                } else {
                    return Err(ExprError::UnexpectedChar { found: c, position });
                }
            }
            '=' => {
                // Accepts both == and === spellings; there is only one
                // equality in this language.
                if chars.get(i + 1) == Some(&'=') {
                    i += 1;
                    if chars.get(i + 1) == Some(&'=') {
                        i += 1;
                    }
                    tokens.push(spanned(Token::EqEq, position));
                } else {
                    return Err(ExprError::UnexpectedChar { found: c, position });
                }
            }
            '!' => {
                if chars.get(i + 1) == Some(&'=') {
                    i += 1;
                    if chars.get(i + 1) == Some(&'=') {
                        i += 1;
                    }
                    tokens.push(spanned(Token::BangEq, position));
                } else {
                    tokens.push(spanned(Token::Bang, position));
                }
            }
            '>' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(spanned(Token::GreaterEq, position));
                    i += 1;
                } else {
                    tokens.push(spanned(Token::Greater, position));
                }
            }
            '<' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(spanned(Token::SmallerEq, position));
                    i += 1;
                } else {
                    tokens.push(spanned(Token::Smaller, position));
                }
            }
            '\'' | '"' => {
                let quote = c;
                let mut literal = String::new();
                let mut j = i + 1;
                loop {
                    match chars.get(j) {
                        None => return Err(ExprError::UnterminatedString(position)),
                        Some(&ch) if ch == quote => break,
                        Some('\\') => {
                            // Escapes pass the next character through verbatim.
                            match chars.get(j + 1) {
                                None => return Err(ExprError::UnterminatedString(position)),
                                Some(&escaped) => {
                                    literal.push(escaped);
                                    j += 2;
                                }
                            }
                        }
                        Some(&ch) => {
                            literal.push(ch);
                            j += 1;
                        }
                    }
                }
                tokens.push(spanned(Token::Str(literal), position));
                i = j;
            }
            '0'..='9' => {
                let mut j = i;
                while matches!(chars.get(j), Some('0'..='9')) {
                    j += 1;
                }
                if chars.get(j) == Some(&'.') && matches!(chars.get(j + 1), Some('0'..='9')) {
                    j += 1;
                    while matches!(chars.get(j), Some('0'..='9')) {
                        j += 1;
                    }
                }
                let text: String = chars[i..j].iter().collect();
                let number = text
                    .parse::<f64>()
                    .map_err(|_| ExprError::UnexpectedChar { found: c, position })?;
                tokens.push(spanned(Token::Number(number), position));
                i = j;
                continue;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut j = i;
                while matches!(chars.get(j), Some(ch) if ch.is_ascii_alphanumeric() || *ch == '_') {
                    j += 1;
                }
                let word: String = chars[i..j].iter().collect();
                let token = match word.as_str() {
                    "true" => Token::True,
                    "false" => Token::False,
                    "null" => Token::Null,
                    _ => Token::Ident(word),
                };
                tokens.push(spanned(token, position));
                i = j;
                continue;
            }
            _ => return Err(ExprError::UnexpectedChar { found: c, position }),
        }
        i += 1;
    }

    Ok(tokens)
}

fn spanned(token: Token, position: usize) -> SpannedToken {
    SpannedToken { token, position }
}
