//! Lexer (tokenizer) for IDL source text
//!
//! Converts raw source text into a flat [`Token`] sequence consumed by the parser.
//! Whitespace and `/* ... */` block comments are skipped. Keywords are not
//! special here: `enum`, `struct` and `interface` come out as ordinary
//! identifiers and the parser decides what they mean by comparing text.

use miette::{Diagnostic, SourceSpan};
use std::fmt;
use thiserror::Error;

/// The closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    LParen,    // (
    RParen,    // )
    Comma,     // ,
    Colon,     // :
    Semicolon, // ;
    LBrace,    // {
    RBrace,    // }
    Arrow,     // ->
    End,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Arrow => write!(f, "'->'"),
            TokenKind::End => write!(f, "end of input"),
        }
    }
}

/// A classified lexeme. Positions are only used for error reporting:
/// `offset` is the character index of the lexeme in the source, `byte_offset`
/// its byte position (for slicing and source spans).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
    pub byte_offset: usize,
}

impl Token {
    /// Token at `offset`, for ASCII-only sources where characters and bytes coincide
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self::at(kind, text, offset, offset)
    }

    pub fn at(kind: TokenKind, text: impl Into<String>, offset: usize, byte_offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
            byte_offset,
        }
    }

    pub fn is_identifier(&self, text: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == text
    }

    pub fn span(&self) -> SourceSpan {
        (self.byte_offset, self.text.len()).into()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::End => write!(f, "end of input"),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// Lexer error type
#[derive(Debug, Error, Diagnostic)]
pub enum LexError {
    #[error("unknown token at {offset}: '{ch}'")]
    #[diagnostic(code(idl::lex::unknown_token))]
    UnknownToken {
        ch: char,
        offset: usize,
        #[label("not a valid token")]
        span: SourceSpan,
    },

    #[error("unterminated comment starting at {offset}")]
    #[diagnostic(
        code(idl::lex::unterminated_comment),
        help("block comments must be closed with '*/'")
    )]
    UnterminatedComment {
        offset: usize,
        #[label("comment opened here")]
        span: SourceSpan,
    },
}

impl LexError {
    /// Character index where scanning failed
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnknownToken { offset, .. } | LexError::UnterminatedComment { offset, .. } => {
                *offset
            }
        }
    }
}

/// Scanner options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Skip `/* ... */` comments. When off, `/` is an unknown token.
    pub block_comments: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            block_comments: true,
        }
    }
}

/// Scan position: character index and byte offset
#[derive(Debug, Clone, Copy)]
struct Mark {
    index: usize,
    byte: usize,
}

/// Lexer for IDL source
pub struct Lexer<'a> {
    input: &'a str,
    position: usize, // bytes
    index: usize,    // characters
    config: LexerConfig,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, LexerConfig::default())
    }

    pub fn with_config(input: &'a str, config: LexerConfig) -> Self {
        Self {
            input,
            position: 0,
            index: 0,
            config,
        }
    }

    /// Tokenize the entire input. The result always ends with a single `End` token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            let start = self.mark();
            let Some(ch) = self.advance() else {
                tokens.push(Token::at(TokenKind::End, "", start.index, start.byte));
                break;
            };

            tokens.push(self.next_token(ch, start)?);
        }

        Ok(tokens)
    }

    /// Finish the token starting with `ch`, already consumed at `start`
    fn next_token(&mut self, ch: char, start: Mark) -> Result<Token, LexError> {
        let kind = match ch {
            'a'..='z' | 'A'..='Z' | '_' => return Ok(self.identifier(start)),
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            // no standalone '-' in the grammar
            '-' if self.peek() == Some('>') => {
                self.advance();
                TokenKind::Arrow
            }
            _ => {
                return Err(LexError::UnknownToken {
                    ch,
                    offset: start.index,
                    span: (start.byte, ch.len_utf8()).into(),
                })
            }
        };

        Ok(self.token_from(kind, start))
    }

    /// Scan the rest of an identifier whose first character is already consumed
    fn identifier(&mut self, start: Mark) -> Token {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        self.token_from(TokenKind::Identifier, start)
    }

    fn token_from(&self, kind: TokenKind, start: Mark) -> Token {
        let text = &self.input[start.byte..self.position];
        Token::at(kind, text, start.index, start.byte)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') if self.config.block_comments && self.peek_ahead(1) == Some('*') => {
                    self.skip_block_comment()?;
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip block comment (/* ... */). Comments do not nest.
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start = self.mark();
        let body = start.byte + 2;

        match self.input[body..].find("*/") {
            Some(end) => {
                let close = body + end + 2;
                self.index += self.input[self.position..close].chars().count();
                self.position = close;
                Ok(())
            }
            None => Err(LexError::UnterminatedComment {
                offset: start.index,
                span: (start.byte, 2).into(),
            }),
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input[self.position..].chars().nth(n)
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        self.index += 1;
        Some(ch)
    }

    fn mark(&self) -> Mark {
        Mark {
            index: self.index,
            byte: self.position,
        }
    }
}

/// Tokenize `input` with the default configuration (block comments on).
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("struct P { x: List(int); f: () -> int; }").unwrap();

        use TokenKind::*;
        assert_eq!(
            kinds(&tokens),
            vec![
                Identifier, Identifier, LBrace, Identifier, Colon, Identifier, LParen, Identifier,
                RParen, Semicolon, Identifier, Colon, LParen, RParen, Arrow, Identifier, Semicolon,
                RBrace, End,
            ]
        );
        assert_eq!(tokens[0].text, "struct");
        assert_eq!(tokens[1].text, "P");
        assert_eq!(tokens[14].text, "->");
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::End);

        let tokens = tokenize(" \t\r\n /* only a comment */ ").unwrap();
        assert_eq!(kinds(&tokens), vec![TokenKind::End]);
    }

    #[test]
    fn test_offsets() {
        let tokens = tokenize("  ab_1 ->x").unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::Identifier, "ab_1", 2));
        assert_eq!(tokens[1], Token::new(TokenKind::Arrow, "->", 7));
        assert_eq!(tokens[2], Token::new(TokenKind::Identifier, "x", 9));
        assert_eq!(tokens[3].offset, 10);
    }

    #[test]
    fn test_identifier_cannot_start_with_digit() {
        let err = tokenize("1abc").unwrap_err();
        assert!(matches!(err, LexError::UnknownToken { ch: '1', offset: 0, .. }));
    }

    #[test]
    fn test_digits_inside_identifier() {
        let tokens = tokenize("vec3 _0").unwrap();
        assert_eq!(tokens[0].text, "vec3");
        assert_eq!(tokens[1].text, "_0");
    }

    #[test]
    fn test_comments() {
        let tokens = tokenize("a /* b ; c */ d /* / * */e").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "d", "e", ""]);
    }

    #[test]
    fn test_comments_do_not_nest() {
        // the first '*/' closes the comment, leaving a stray '*'
        let err = tokenize("/* a /* b */ c */").unwrap_err();
        assert!(matches!(err, LexError::UnknownToken { ch: '*', offset: 15, .. }));
    }

    #[test]
    fn test_comment_opener_is_not_a_closer() {
        let err = tokenize("/*/").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedComment { offset: 0, .. }));
    }

    #[test]
    fn test_unterminated_comment() {
        let err = tokenize("struct A {} /* never closed").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedComment { offset: 12, .. }));
        assert!(err.to_string().contains("unterminated comment"));
    }

    #[test]
    fn test_unknown_character() {
        let err = tokenize("@").unwrap_err();
        assert_eq!(err.offset(), 0);
        assert_eq!(err.to_string(), "unknown token at 0: '@'");
    }

    #[test]
    fn test_lone_minus_is_rejected() {
        let err = tokenize("a - > b").unwrap_err();
        assert!(matches!(err, LexError::UnknownToken { ch: '-', offset: 2, .. }));
    }

    #[test]
    fn test_comments_disabled() {
        let config = LexerConfig {
            block_comments: false,
        };
        let err = Lexer::with_config("a /* b */", config).tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnknownToken { ch: '/', offset: 2, .. }));

        let tokens = Lexer::with_config("a b", config).tokenize().unwrap();
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_non_ascii_is_unknown() {
        let err = tokenize("a é").unwrap_err();
        assert!(matches!(err, LexError::UnknownToken { ch: 'é', offset: 2, .. }));
    }

    #[test]
    fn test_offsets_count_characters_after_non_ascii_comment() {
        let err = tokenize("/* é */ @").unwrap_err();
        assert_eq!(err.offset(), 8);
        assert_eq!(err.to_string(), "unknown token at 8: '@'");
        match err {
            LexError::UnknownToken { span, .. } => assert_eq!(span.offset(), 9),
            _ => panic!("Expected unknown token"),
        }

        let tokens = tokenize("/* ünïcode */ x").unwrap();
        assert_eq!(tokens[0].offset, 14);
        assert_eq!(tokens[0].byte_offset, 16);
        assert_eq!(tokens[0].span().offset(), 16);
        assert_eq!(tokens[1].offset, 15);
    }

    #[test]
    fn test_token_display() {
        let tokens = tokenize("x {").unwrap();
        assert_eq!(tokens[0].to_string(), "'x'");
        assert_eq!(tokens[1].to_string(), "'{'");
        assert_eq!(tokens[2].to_string(), "end of input");
        assert_eq!(TokenKind::RBrace.to_string(), "'}'");
    }
}
