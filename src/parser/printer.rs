//! Canonical text rendering for the AST
//!
//! [`Printer`] walks [`TypeExpr`] and [`Declaration`] nodes and writes into
//! any [`fmt::Write`] sink, so nested types accumulate into one buffer. The
//! output is deterministic and always re-parses to an equal AST:
//!
//! ```text
//! enum Color : int {
//!     Red,
//!     Green
//! }
//! interface Shape : Drawable {
//!     area: () -> float;
//! }
//! ```

use crate::parser::ast::*;
use std::fmt::{self, Write};

const INDENT: &str = "    ";

/// Recursive writer over AST nodes
pub struct Printer<W> {
    out: W,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn type_expr(&mut self, ty: &TypeExpr) -> fmt::Result {
        match ty {
            TypeExpr::Named { name } => self.out.write_str(name),
            TypeExpr::Generic { name, arguments } => {
                self.out.write_str(name)?;
                self.out.write_char('(')?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        self.out.write_str(", ")?;
                    }
                    self.type_expr(arg)?;
                }
                self.out.write_char(')')
            }
            TypeExpr::Function {
                params,
                return_type,
            } => {
                self.out.write_char('(')?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        self.out.write_str(", ")?;
                    }
                    write!(self.out, "{}: ", param.name)?;
                    self.type_expr(&param.param_type)?;
                }
                self.out.write_char(')')?;
                if let Some(ret) = return_type {
                    self.out.write_str(" -> ")?;
                    self.type_expr(ret)?;
                }
                Ok(())
            }
        }
    }

    pub fn declaration(&mut self, decl: &Declaration) -> fmt::Result {
        match decl {
            Declaration::Enum {
                name,
                underlying,
                enumerators,
            } => {
                write!(self.out, "enum {name} : ")?;
                self.type_expr(underlying)?;
                self.out.write_str(" {\n")?;
                for (i, enumerator) in enumerators.iter().enumerate() {
                    self.out.write_str(INDENT)?;
                    self.out.write_str(enumerator)?;
                    // no comma after the last one: the grammar rejects it
                    if i + 1 < enumerators.len() {
                        self.out.write_char(',')?;
                    }
                    self.out.write_char('\n')?;
                }
                self.out.write_char('}')
            }
            Declaration::Struct {
                name,
                parent,
                members,
            }
            | Declaration::Interface {
                name,
                parent,
                members,
            } => {
                write!(self.out, "{} {name}", decl.keyword())?;
                if let Some(parent) = parent {
                    self.out.write_str(" : ")?;
                    self.type_expr(parent)?;
                }
                self.out.write_str(" {\n")?;
                for member in members {
                    write!(self.out, "{INDENT}{}: ", member.name)?;
                    self.type_expr(&member.member_type)?;
                    self.out.write_str(";\n")?;
                }
                self.out.write_char('}')
            }
        }
    }

    /// Every declaration, separated by newlines
    pub fn program(&mut self, program: &Program) -> fmt::Result {
        for (i, decl) in program.iter().enumerate() {
            if i > 0 {
                self.out.write_char('\n')?;
            }
            self.declaration(decl)?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).type_expr(self)
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).declaration(self)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).program(self)
    }
}

/// Render a declaration to its canonical text.
pub fn print(decl: &Declaration) -> String {
    let mut printer = Printer::new(String::new());
    // writing to a String cannot fail
    let _ = printer.declaration(decl);
    printer.into_inner()
}
