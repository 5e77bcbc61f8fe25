//! Prolog surface syntax: logos lexer, recursive-descent parser, and
//! knowledge-base loading.
//!
//! The parser maps source one-to-one onto the term model and returns
//! either raw clauses ([`parse_program`]), a single query expression
//! ([`parse_query`]), or a ready-to-ask [`KnowledgeBase`]
//! ([`knowledge_base`], [`knowledge_base_from_reader`]).

mod error;
mod grammar;
mod lexer;

pub use error::ParseError;
pub use grammar::{parse_program, parse_query};
pub use lexer::{tokenize, Lexer, Token, TokenKind};

use std::io::Read;

use crate::kb::KnowledgeBase;

/// Parses a Prolog program into a knowledge base over the default table.
///
/// Clauses go through the knowledge base's checked `tell`, so a program
/// whose rule bodies resolution cannot evaluate is rejected here rather
/// than mid-proof.
pub fn knowledge_base(source: &str) -> Result<KnowledgeBase, ParseError> {
    let mut kb = KnowledgeBase::new();
    for clause in parse_program(source)? {
        kb.tell(clause)?;
    }
    Ok(kb)
}

/// [`knowledge_base`] from any readable source (a file, a socket, …).
pub fn knowledge_base_from_reader(mut reader: impl Read) -> Result<KnowledgeBase, ParseError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    knowledge_base(&source)
}
