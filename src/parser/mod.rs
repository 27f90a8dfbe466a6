//! IDL source parser
//!
//! This module transforms IDL source text into an Abstract Syntax Tree (AST) and back:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), with the grammar split into
//!   `declarations` and `types`
//! - [`ast`]: AST node definitions
//! - [`printer`]: Canonical text rendering (AST → source text)
//!
//! # Supported language
//!
//! - `enum Name : Underlying { A, B, C }`
//! - `struct Name [: Parent] { member: Type; ... }`
//! - `interface Name [: Parent] { member: Type; ... }`
//! - Types: names (`int`), generics (`List(int)`), functions (`(x: int) -> bool`)
//! - `/* ... */` block comments (non-nesting)
//!
//! # Parser Implementation
//!
//! Hand-written LL(1) recursive descent parser over a fully materialized token
//! sequence. Parsing stops at the first error; there is no recovery and no
//! semantic validation (duplicate names and unknown types are accepted).

pub mod ast;
mod declarations;
pub mod lexer;
pub mod parse;
pub mod printer;
mod types;

use miette::Diagnostic;
use thiserror::Error;

use ast::Program;
use lexer::{LexError, Lexer, LexerConfig};
use parse::{ParseError, Parser};

/// Either phase's failure
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

/// Tokenize and parse `source` with the default lexer configuration.
pub fn parse_source(source: &str) -> Result<Program, Error> {
    parse_source_with(source, LexerConfig::default())
}

pub fn parse_source_with(source: &str, config: LexerConfig) -> Result<Program, Error> {
    let tokens = Lexer::with_config(source, config).tokenize()?;
    let program = Parser::new(&tokens).parse_program()?;
    Ok(program)
}
