//! Declaration parsing implementation
//!
//! This module handles parsing of top-level declarations:
//!
//! - Enums: `enum Name : Underlying { A, B, C }`
//! - Structs: `struct Name [: Parent] { member: Type; ... }`
//! - Interfaces: same shape as structs, introduced by `interface`
//!
//! # Grammar
//!
//! ```text
//! declaration ::= enum_decl | struct_decl
//! enum_decl   ::= "enum" identifier ":" identifier "{" ( identifier ( "," identifier )* )? "}"
//! struct_decl ::= ( "struct" | "interface" ) identifier ( ":" type_expr )? "{" member* "}"
//! member      ::= identifier ":" type_expr ";"
//! ```
//!
//! The keywords are contextual: the lexer emits them as identifiers and only
//! the top-level dispatch compares their text. A member may therefore be named
//! `struct`.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser<'_> {
    /// Parse a top-level declaration, dispatching on the keyword's text
    pub(crate) fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let keyword = match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => token.text.as_str(),
            _ => return Err(self.unexpected(Some(KEYWORD_HELP.to_string()))),
        };

        match keyword {
            "enum" => {
                self.advance();
                self.parse_enum()
            }
            "struct" | "interface" => {
                let is_interface = keyword == "interface";
                self.advance();
                self.parse_struct(is_interface)
            }
            _ => Err(self.unexpected(Some(KEYWORD_HELP.to_string()))),
        }
    }

    /// Parse enum declaration after `enum`: Name : Underlying { A, B }
    fn parse_enum(&mut self) -> Result<Declaration, ParseError> {
        let name = self.expect_identifier("after 'enum'")?;
        self.expect_token(TokenKind::Colon, "after enum name")?;
        // underlying type is a bare name, never generic or function
        let underlying = TypeExpr::Named {
            name: self.expect_identifier("for the underlying type")?,
        };
        self.expect_token(TokenKind::LBrace, "after underlying type")?;

        let mut enumerators = Vec::new();
        if !self.match_token(TokenKind::RBrace) {
            loop {
                enumerators.push(self.expect_identifier("for enumerator")?);

                if self.match_token(TokenKind::Comma) {
                    continue;
                }
                self.expect_token(TokenKind::RBrace, "after enumerators")?;
                break;
            }
        }

        Ok(Declaration::Enum {
            name,
            underlying,
            enumerators,
        })
    }

    /// Parse struct or interface after the keyword: Name [: Parent] { members }
    fn parse_struct(&mut self, is_interface: bool) -> Result<Declaration, ParseError> {
        let name = self.expect_identifier("after declaration keyword")?;

        let parent = if self.match_token(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        self.expect_token(TokenKind::LBrace, "before member list")?;

        let mut members = Vec::new();
        while !self.match_token(TokenKind::RBrace) {
            members.push(self.parse_member()?);
        }

        Ok(if is_interface {
            Declaration::Interface {
                name,
                parent,
                members,
            }
        } else {
            Declaration::Struct {
                name,
                parent,
                members,
            }
        })
    }

    /// Parse member: name: Type;
    fn parse_member(&mut self) -> Result<Member, ParseError> {
        let name = self.expect_identifier("for member name")?;
        self.expect_token(TokenKind::Colon, "after member name")?;
        let member_type = self.parse_type()?;
        self.expect_token(TokenKind::Semicolon, "after member")?;

        Ok(Member { name, member_type })
    }
}

const KEYWORD_HELP: &str = "expected 'enum', 'struct' or 'interface'";

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::{parse, ParseError};

    fn parse_one(source: &str) -> Result<Declaration, ParseError> {
        let tokens = tokenize(source).unwrap();
        let program = parse(&tokens)?;
        assert_eq!(program.len(), 1);
        Ok(program.into_declarations().remove(0))
    }

    #[test]
    fn test_parse_enum() {
        let decl = parse_one("enum Color : int { Red, Green, Blue }").unwrap();
        assert_eq!(
            decl,
            Declaration::Enum {
                name: "Color".to_string(),
                underlying: TypeExpr::named("int"),
                enumerators: vec!["Red".to_string(), "Green".to_string(), "Blue".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_empty_enum() {
        match parse_one("enum E : int {}").unwrap() {
            Declaration::Enum { enumerators, .. } => assert!(enumerators.is_empty()),
            _ => panic!("Expected enum"),
        }
    }

    #[test]
    fn test_enum_trailing_comma_rejected() {
        let err = parse_one("enum E : int { A, }").unwrap_err();
        assert_eq!(err.found, "'}'");
        assert_eq!(err.offset, 18);
    }

    #[test]
    fn test_enum_missing_comma_rejected() {
        let err = parse_one("enum E : int { A B }").unwrap_err();
        assert_eq!(err.found, "'B'");
    }

    #[test]
    fn test_enum_generic_underlying_rejected() {
        let err = parse_one("enum E : List(int) { A }").unwrap_err();
        assert_eq!(err.found, "'('");
    }

    #[test]
    fn test_enum_duplicates_accepted() {
        match parse_one("enum E : int { A, A }").unwrap() {
            Declaration::Enum { enumerators, .. } => assert_eq!(enumerators, vec!["A", "A"]),
            _ => panic!("Expected enum"),
        }
    }

    #[test]
    fn test_parse_struct() {
        let decl = parse_one("struct Point { x: int; y: int; }").unwrap();
        match decl {
            Declaration::Struct {
                name,
                parent,
                members,
            } => {
                assert_eq!(name, "Point");
                assert!(parent.is_none());
                assert_eq!(
                    members,
                    vec![
                        Member::new("x", TypeExpr::named("int")),
                        Member::new("y", TypeExpr::named("int")),
                    ]
                );
            }
            _ => panic!("Expected struct definition"),
        }
    }

    #[test]
    fn test_parse_interface_with_generic_parent() {
        let decl = parse_one("interface Repo : Store(User) { get: (id: int) -> User; }").unwrap();
        match decl {
            Declaration::Interface {
                name,
                parent,
                members,
            } => {
                assert_eq!(name, "Repo");
                assert_eq!(
                    parent,
                    Some(TypeExpr::generic("Store", vec![TypeExpr::named("User")]))
                );
                assert_eq!(members.len(), 1);
                assert!(matches!(members[0].member_type, TypeExpr::Function { .. }));
            }
            _ => panic!("Expected interface"),
        }
    }

    #[test]
    fn test_struct_with_function_parent() {
        // syntactically legal, semantics out of scope
        let decl = parse_one("struct S : () -> int {}").unwrap();
        assert!(matches!(
            decl,
            Declaration::Struct { parent: Some(TypeExpr::Function { .. }), .. }
        ));
    }

    #[test]
    fn test_empty_bodies() {
        for source in ["struct S {}", "interface I {}", "struct S : Base {}"] {
            match parse_one(source).unwrap() {
                Declaration::Struct { members, .. } | Declaration::Interface { members, .. } => {
                    assert!(members.is_empty())
                }
                _ => panic!("Expected struct or interface"),
            }
        }
    }

    #[test]
    fn test_member_requires_semicolon() {
        let err = parse_one("struct S { x: int }").unwrap_err();
        assert_eq!(err.found, "'}'");
        assert_eq!(err.expected.as_deref(), Some("expected ';' after member"));
    }

    #[test]
    fn test_comma_separated_members_rejected() {
        let err = parse_one("struct S { x: int, y: int; }").unwrap_err();
        assert_eq!(err.found, "','");
    }

    #[test]
    fn test_keyword_shaped_member_names() {
        let decl = parse_one("struct S { struct: enum; interface: List(struct); }").unwrap();
        match decl {
            Declaration::Struct { members, .. } => {
                assert_eq!(members[0], Member::new("struct", TypeExpr::named("enum")));
                assert_eq!(members[1].name, "interface");
            }
            _ => panic!("Expected struct"),
        }
    }

    #[test]
    fn test_missing_name() {
        let err = parse_one("struct { }").unwrap_err();
        assert_eq!(err.found, "'{'");
        assert_eq!(err.offset, 7);
    }
}
