//! Recursive-descent parser for Prolog programs and queries.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! program     = clause* EOF
//! clause      = term (":-" body)? "."
//! body        = disjunction
//! disjunction = conjunction (";" conjunction)*
//! conjunction = unary ("," unary)*
//! unary       = "\+" unary | "not" "(" body ")" | primary
//! primary     = "!" | "true" | "fail" | "false"
//!             | variable | integer | float | string
//!             | list | atom-or-compound | "(" body ")"
//! list        = "[" (arg ("," arg)* ("|" (variable | list))?)? "]"
//! ```
//!
//! The mapping onto the term model is one-to-one: `,` builds a
//! conjunction, `;` a disjunction, `\+`/`not` a negation, `:-` a rule,
//! `true` the empty conjunction, `fail`/`false` the empty disjunction.

use text_size::{TextRange, TextSize};

use crate::term::{reset_ids_rule, Float, Keyword, Logical, Rule, Term, Var};

use super::error::ParseError;
use super::lexer::{tokenize, Token, TokenKind};

/// Parses a whole program into its clauses.
pub fn parse_program(input: &str) -> Result<Vec<Rule>, ParseError> {
    let tokens = tokenize(input);
    let mut parser = Parser::new(&tokens, input);
    let mut clauses = Vec::new();
    while !parser.at_eof() {
        clauses.push(parser.clause()?);
    }
    Ok(clauses)
}

/// Parses a single query expression, with an optional trailing `.`.
pub fn parse_query(input: &str) -> Result<Logical, ParseError> {
    let tokens = tokenize(input);
    let mut parser = Parser::new(&tokens, input);
    let query = parser.body()?;
    parser.eat(TokenKind::Dot);
    if !parser.at_eof() {
        return Err(parser.error("expected end of query"));
    }
    Ok(query)
}

/// The parser state: a token cursor.
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    source: &'a str,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], source: &'a str) -> Parser<'a> {
        Parser {
            tokens,
            pos: 0,
            source,
        }
    }

    // =========================================================================
    // Token inspection and consumption
    // =========================================================================

    fn current(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            let found = self
                .current_kind()
                .map(|k| k.name())
                .unwrap_or("end of input");
            Err(self.error(format!("expected {}, found {}", kind.name(), found)))
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let range = self.current().map(|t| t.range).unwrap_or_else(|| {
            let end = TextSize::new(self.source.len() as u32);
            TextRange::empty(end)
        });
        ParseError::syntax(message, range)
    }

    // =========================================================================
    // Productions
    // =========================================================================

    fn clause(&mut self) -> Result<Rule, ParseError> {
        let head = self.primary()?;
        let Logical::Term(head) = head else {
            return Err(self.error("clause head must be a term"));
        };
        let body = if self.eat(TokenKind::ColonDash) {
            self.body()?
        } else {
            Logical::yes()
        };
        self.expect(TokenKind::Dot)?;
        Ok(reset_ids_rule(&Rule::new(head, body)))
    }

    fn body(&mut self) -> Result<Logical, ParseError> {
        self.disjunction()
    }

    fn disjunction(&mut self) -> Result<Logical, ParseError> {
        let mut items = vec![self.conjunction()?];
        while self.eat(TokenKind::Semicolon) {
            items.push(self.conjunction()?);
        }
        if items.len() == 1 {
            Ok(items.swap_remove(0))
        } else {
            Ok(Logical::or(items))
        }
    }

    fn conjunction(&mut self) -> Result<Logical, ParseError> {
        let mut items = vec![self.unary()?];
        while self.eat(TokenKind::Comma) {
            items.push(self.unary()?);
        }
        if items.len() == 1 {
            Ok(items.swap_remove(0))
        } else {
            Ok(Logical::and(items))
        }
    }

    fn unary(&mut self) -> Result<Logical, ParseError> {
        if self.eat(TokenKind::NotProvable) {
            return Ok(Logical::negate(self.unary()?));
        }
        // `not(...)` spelling of negation as failure
        if self.current().is_some_and(|t| t.kind == TokenKind::Atom && t.text == "not")
            && self.nth_kind(1) == Some(TokenKind::LParen)
        {
            self.pos += 2;
            let inner = self.body()?;
            self.expect(TokenKind::RParen)?;
            return Ok(Logical::negate(inner));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Logical, ParseError> {
        let Some(token) = self.current() else {
            return Err(self.error("expected a term"));
        };
        match token.kind {
            TokenKind::Bang => {
                self.pos += 1;
                Ok(Logical::Keyword(Keyword::Cut))
            }
            TokenKind::Variable => {
                self.pos += 1;
                Ok(Logical::Var(Var::new(token.text)))
            }
            TokenKind::Integer => {
                self.pos += 1;
                match token.text.parse::<i64>() {
                    Ok(value) => Ok(Logical::Int(value)),
                    Err(_) => Err(ParseError::syntax(
                        format!("integer out of range: {}", token.text),
                        token.range,
                    )),
                }
            }
            TokenKind::Float => {
                self.pos += 1;
                match token.text.parse::<f64>() {
                    Ok(value) => Ok(Logical::Float(Float(value))),
                    Err(_) => Err(ParseError::syntax(
                        format!("malformed number: {}", token.text),
                        token.range,
                    )),
                }
            }
            TokenKind::String => {
                self.pos += 1;
                Ok(Logical::Str(unescape(token.text).into()))
            }
            TokenKind::LBracket => Ok(Logical::List(self.list_items()?)),
            TokenKind::LParen => {
                self.pos += 1;
                let inner = self.body()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Atom => {
                self.pos += 1;
                self.atom_or_compound(token.text)
            }
            _ => Err(self.error("expected a term")),
        }
    }

    /// The atom token itself is already consumed.
    fn atom_or_compound(&mut self, name: &str) -> Result<Logical, ParseError> {
        match name {
            "true" => return Ok(Logical::yes()),
            "fail" | "false" => return Ok(Logical::no()),
            _ => {}
        }
        if self.eat(TokenKind::LParen) {
            let mut args = vec![self.primary()?];
            while self.eat(TokenKind::Comma) {
                args.push(self.primary()?);
            }
            self.expect(TokenKind::RParen)?;
            Ok(Logical::Term(Term::new(name, args)))
        } else {
            Ok(Logical::Term(Term::new(name, [])))
        }
    }

    /// `[a, b, c]`, `[H | T]`, `[a, b | [c, d]]`.
    fn list_items(&mut self) -> Result<Vec<Logical>, ParseError> {
        self.expect(TokenKind::LBracket)?;
        if self.eat(TokenKind::RBracket) {
            return Ok(Vec::new());
        }
        let mut items = vec![self.primary()?];
        while self.eat(TokenKind::Comma) {
            items.push(self.primary()?);
        }
        if self.eat(TokenKind::Pipe) {
            match self.current() {
                Some(token) if token.kind == TokenKind::Variable => {
                    self.pos += 1;
                    items.push(Var::new(token.text).tail());
                }
                Some(token) if token.kind == TokenKind::LBracket => {
                    // a literal tail list splices in place
                    items.extend(self.list_items()?);
                }
                _ => return Err(self.error("expected a variable or list after '|'")),
            }
        }
        self.expect(TokenKind::RBracket)?;
        Ok(items)
    }
}

fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
