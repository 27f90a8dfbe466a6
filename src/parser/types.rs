//! Type expression parsing implementation
//!
//! # Grammar
//!
//! ```text
//! type_expr ::= identifier ( "(" ( type_expr ( "," type_expr )* )? ")" )?
//!             | "(" ( param ( "," param )* )? ")" ( "->" type_expr )?
//! param     ::= identifier ":" type_expr
//! ```
//!
//! An identifier immediately followed by `(` is a generic instantiation. A
//! leading `(` always starts a function type, and every parameter must be
//! named: `(int, int)` is not a valid type.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser, MAX_TYPE_DEPTH};

impl Parser<'_> {
    /// Parse a type expression, nested at most [`MAX_TYPE_DEPTH`] deep
    pub(crate) fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        if self.depth >= MAX_TYPE_DEPTH {
            return Err(self.unexpected(Some("type nesting too deep".to_string())));
        }

        self.depth += 1;
        let ty = self.parse_type_expr();
        self.depth -= 1;
        ty
    }

    fn parse_type_expr(&mut self) -> Result<TypeExpr, ParseError> {
        match self.peek_kind() {
            TokenKind::Identifier => {
                let name = self.expect_identifier("")?;
                if self.match_token(TokenKind::LParen) {
                    let arguments = self.parse_type_arguments()?;
                    Ok(TypeExpr::Generic { name, arguments })
                } else {
                    Ok(TypeExpr::Named { name })
                }
            }
            TokenKind::LParen => {
                self.advance();
                self.parse_function_type()
            }
            _ => Err(self.unexpected(Some("expected a type".to_string()))),
        }
    }

    /// Parse generic arguments after the opening '(': T, U, ... )
    fn parse_type_arguments(&mut self) -> Result<Vec<TypeExpr>, ParseError> {
        let mut arguments = Vec::new();

        if self.match_token(TokenKind::RParen) {
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_type()?);

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        self.expect_token(TokenKind::RParen, "after type arguments")?;
        Ok(arguments)
    }

    /// Parse a function type after the opening '(': params ) [-> type]
    fn parse_function_type(&mut self) -> Result<TypeExpr, ParseError> {
        let params = self.parse_parameter_list()?;
        self.expect_token(TokenKind::RParen, "after parameters")?;

        let return_type = if self.match_token(TokenKind::Arrow) {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };

        Ok(TypeExpr::Function {
            params,
            return_type,
        })
    }

    /// Parse parameter list: name: type, name: type, ...
    fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let name = self.expect_identifier("for parameter name")?;
            self.expect_token(TokenKind::Colon, "after parameter name")?;
            let param_type = self.parse_type()?;
            params.push(Param { name, param_type });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }
}
