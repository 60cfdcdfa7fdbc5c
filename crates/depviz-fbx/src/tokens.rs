//! Token definitions for the FBX ASCII lexer.

use std::fmt;

use crate::span::Span;

/// A lexical token of an FBX ASCII document.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    /// Node name or bare word such as `T`, `Y` or `W`.
    Identifier(&'a str),
    /// Double-quoted string, with `&quot;` already unescaped.
    StringLiteral(String),
    Integer(i64),
    Float(f64),
    /// Array length marker `*N`.
    ArrayLength(usize),
    Colon,
    Comma,
    LeftBrace,
    RightBrace,
    /// `;` comment up to the end of the line.
    Comment(&'a str),
    Newline,
    Whitespace,
}

impl Token<'_> {
    /// Returns `true` for tokens the parser never looks at.
    pub fn is_trivia(&self) -> bool {
        matches!(self, Token::Comment(_) | Token::Whitespace)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "identifier `{name}`"),
            Token::StringLiteral(_) => write!(f, "string"),
            Token::Integer(value) => write!(f, "integer `{value}`"),
            Token::Float(value) => write!(f, "number `{value}`"),
            Token::ArrayLength(len) => write!(f, "array marker `*{len}`"),
            Token::Colon => write!(f, "`:`"),
            Token::Comma => write!(f, "`,`"),
            Token::LeftBrace => write!(f, "`{{`"),
            Token::RightBrace => write!(f, "`}}`"),
            Token::Comment(_) => write!(f, "comment"),
            Token::Newline => write!(f, "end of line"),
            Token::Whitespace => write!(f, "whitespace"),
        }
    }
}

/// A token together with its location in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'a> {
    pub token: Token<'a>,
    pub span: Span,
}

impl<'a> PositionedToken<'a> {
    pub fn new(token: Token<'a>, span: Span) -> Self {
        Self { token, span }
    }
}
