//! Expression tokenizer
//!
//! Splits expression text into numbers, identifiers, operators and
//! punctuation. Register letters are not recognised here; the parser
//! decides from position whether an identifier names a register or a
//! function.

use matx_core::{parse_number, MatxError};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    At,
    LParen,
    RParen,
    Comma,
}

impl TokenKind {
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Number(n) => format!("number {}", n),
            TokenKind::Ident(name) => format!("'{}'", name),
            TokenKind::Plus => "'+'".to_string(),
            TokenKind::Minus => "'-'".to_string(),
            TokenKind::Star => "'*'".to_string(),
            TokenKind::Slash => "'/'".to_string(),
            TokenKind::At => "'@'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Comma => "','".to_string(),
        }
    }
}

/// Token with its zero-based character column
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub column: usize,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, MatxError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let column = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let single = match c {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Star),
            '/' => Some(TokenKind::Slash),
            '@' => Some(TokenKind::At),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            ',' => Some(TokenKind::Comma),
            _ => None,
        };
        if let Some(kind) = single {
            tokens.push(Token { kind, column });
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            i = scan_number(&chars, i);
            let text: String = chars[column..i].iter().collect();
            let value = parse_number(&text)
                .map_err(|_| MatxError::parse_error(format!("malformed number '{}'", text)).at_column(column))?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                column,
            });
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let name: String = chars[column..i].iter().collect();
            tokens.push(Token {
                kind: TokenKind::Ident(name),
                column,
            });
            continue;
        }

        return Err(MatxError::parse_error(format!("unexpected character '{}'", c))
            .with_input(input)
            .at_column(column));
    }

    Ok(tokens)
}

/// End index of a number literal: digits, one fraction, optional exponent.
fn scan_number(chars: &[char], start: usize) -> usize {
    let mut i = start;
    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        i += 1;
    }

    // Exponent only when digits follow, so `2e` stays a number and an ident
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}
