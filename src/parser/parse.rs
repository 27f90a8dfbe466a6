//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is an LL(1) recursive descent parser with the following organization:
//! - This module: Parser struct, cursor helpers, and the top-level loop
//! - `declarations`: `enum`, `struct` and `interface` declarations
//! - `types`: type expressions (named, generic, function)
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared cursor. The cursor only ever moves forward
//! and never moves past the terminating `End` token.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Error, Diagnostic)]
#[error("unexpected token {found} at {offset}")]
#[diagnostic(code(idl::parse::unexpected_token))]
pub struct ParseError {
    /// Display form of the offending token
    pub found: String,
    pub offset: usize,
    #[label("unexpected token")]
    pub span: SourceSpan,
    #[help]
    pub expected: Option<String>,
}

impl ParseError {
    pub(crate) fn at(token: &Token, expected: Option<String>) -> Self {
        ParseError {
            found: token.to_string(),
            offset: token.offset,
            span: token.span(),
            expected,
        }
    }
}

/// Deepest type expression nesting accepted. Bounds recursion in the parser,
/// the printer and `Drop` for anything parsed.
pub const MAX_TYPE_DEPTH: usize = 256;

/// Recursive descent parser over a token sequence ending in `End`
pub struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) position: usize,
    pub(crate) depth: usize, // current type expression nesting
}

impl<'a> Parser<'a> {
    /// Create a parser over `tokens`. A missing `End` terminator is tolerated:
    /// running off the end is reported as an unexpected end of input.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse the entire program (top-level declarations)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            let decl = self.parse_declaration()?;
            program.push(decl);
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::End
    }

    pub(crate) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().map_or(TokenKind::End, |t| t.kind)
    }

    /// Error at the current token
    pub(crate) fn unexpected(&self, expected: Option<String>) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::at(token, expected),
            None => {
                let (offset, byte_offset) = self.tokens.last().map_or((0, 0), |t| {
                    (t.offset + t.text.chars().count(), t.byte_offset + t.text.len())
                });
                ParseError::at(&Token::at(TokenKind::End, "", offset, byte_offset), expected)
            }
        }
    }

    pub(crate) fn expect_token(&mut self, kind: TokenKind, ctx: &str) -> Result<(), ParseError> {
        if self.match_token(kind) {
            Ok(())
        } else {
            Err(self.unexpected(Some(format!("expected {kind} {ctx}"))))
        }
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                self.advance();
                Ok(token.text.clone())
            }
            _ => Err(self.unexpected(Some(format!("expected identifier {ctx}")))),
        }
    }
}

/// Parse a complete token sequence into declarations, in source order.
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}
