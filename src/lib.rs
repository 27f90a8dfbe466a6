//! # Introduction
//!
//! `idl-parser` reads a small interface-definition language describing
//! enumerations, structures and interfaces, and renders the resulting AST
//! back to a canonical textual form.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Program → Printer
//! ```
//!
//! 1. [`parser::lexer`] — scans the source into tokens, skipping whitespace
//!    and block comments.
//! 2. [`parser::parse`] — single-token-lookahead recursive descent over the
//!    token slice, producing a [`parser::ast::Program`].
//! 3. [`parser::printer`] — canonical text for every node; `parse` of printed
//!    output yields an equal AST.
//!
//! ## Example
//!
//! ```
//! use idl_parser::parse_source;
//!
//! let program = parse_source("struct Point { x: int; y: int; }").unwrap();
//! assert_eq!(
//!     program.to_string(),
//!     "struct Point {\n    x: int;\n    y: int;\n}"
//! );
//! ```

pub mod parser;

pub use parser::ast::{Declaration, Member, Param, Program, TypeExpr};
pub use parser::lexer::{tokenize, LexError, LexerConfig, Token, TokenKind};
pub use parser::parse::{parse, ParseError, Parser};
pub use parser::printer::print;
pub use parser::{parse_source, parse_source_with, Error};
