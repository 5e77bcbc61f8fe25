//! Logos-based lexer for Prolog surface syntax.
//!
//! Whitespace and `%` line comments are skipped; every other token carries
//! its text and byte range.

use logos::Logos;
use text_size::{TextRange, TextSize};

/// Raw logos tokens. Mapped to [`TokenKind`] so lexing failures become an
/// ordinary token instead of a `Result` the parser has to thread through.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"%[^\n]*")]
enum RawToken {
    #[regex(r"[a-z][a-zA-Z0-9_]*")]
    Atom,

    #[regex(r"[A-Z_][a-zA-Z0-9_]*")]
    Variable,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token(";")]
    Semicolon,

    #[token("|")]
    Pipe,

    #[token(":-")]
    ColonDash,

    #[token(r"\+")]
    NotProvable,

    #[token("!")]
    Bang,
}

/// The token vocabulary the parser consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Atom,
    Variable,
    Integer,
    Float,
    String,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Semicolon,
    Pipe,
    ColonDash,
    NotProvable,
    Bang,
    Error,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> TokenKind {
        match raw {
            RawToken::Atom => TokenKind::Atom,
            RawToken::Variable => TokenKind::Variable,
            RawToken::Integer => TokenKind::Integer,
            RawToken::Float => TokenKind::Float,
            RawToken::String => TokenKind::String,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::ColonDash => TokenKind::ColonDash,
            RawToken::NotProvable => TokenKind::NotProvable,
            RawToken::Bang => TokenKind::Bang,
        }
    }
}

impl TokenKind {
    /// Human-readable name for error messages.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Atom => "atom",
            TokenKind::Variable => "variable",
            TokenKind::Integer => "integer",
            TokenKind::Float => "number",
            TokenKind::String => "string",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Semicolon => "';'",
            TokenKind::Pipe => "'|'",
            TokenKind::ColonDash => "':-'",
            TokenKind::NotProvable => "'\\+'",
            TokenKind::Bang => "'!'",
            TokenKind::Error => "unrecognized input",
        }
    }
}

/// A token with its kind, text, and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

/// Lexer wrapping the logos-generated tokenizer.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, RawToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            inner: RawToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.inner.next()?;
        let span = self.inner.span();
        let range = TextRange::new(
            TextSize::new(span.start as u32),
            TextSize::new(span.end as u32),
        );
        let kind = match raw {
            Ok(token) => token.into(),
            Err(()) => TokenKind::Error,
        };
        Some(Token {
            kind,
            text: self.inner.slice(),
            range,
        })
    }
}

/// Tokenize an entire string into a Vec.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}
