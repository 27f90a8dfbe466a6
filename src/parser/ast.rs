// AST (Abstract Syntax Tree) definitions for IDL declarations

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A type reference as it appears in member, parameter, return and parent positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// Bare identifier: `int`, `Drawable`
    Named { name: String },
    /// Template instantiation: `List(int)`, `Map(string, List(int))`, `Unit()`
    Generic {
        name: String,
        arguments: Vec<TypeExpr>,
    },
    /// Function signature: `(x: int, y: int) -> float`, `()`
    Function {
        params: Vec<Param>,
        return_type: Option<Box<TypeExpr>>,
    },
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named { name: name.into() }
    }

    pub fn generic(name: impl Into<String>, arguments: Vec<TypeExpr>) -> Self {
        TypeExpr::Generic {
            name: name.into(),
            arguments,
        }
    }

    pub fn function(params: Vec<Param>, return_type: Option<TypeExpr>) -> Self {
        TypeExpr::Function {
            params,
            return_type: return_type.map(Box::new),
        }
    }
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub param_type: TypeExpr,
}

impl Param {
    pub fn new(name: impl Into<String>, param_type: TypeExpr) -> Self {
        Self {
            name: name.into(),
            param_type,
        }
    }
}

/// Struct or interface member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub member_type: TypeExpr,
}

impl Member {
    pub fn new(name: impl Into<String>, member_type: TypeExpr) -> Self {
        Self {
            name: name.into(),
            member_type,
        }
    }
}

/// Top-level declarations
///
/// Member and enumerator lists keep source order. Names are not checked for
/// uniqueness and parent/underlying types are not resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Enum {
        name: String,
        underlying: TypeExpr, // always TypeExpr::Named
        enumerators: Vec<String>,
    },
    Struct {
        name: String,
        parent: Option<TypeExpr>,
        members: Vec<Member>,
    },
    Interface {
        name: String,
        parent: Option<TypeExpr>,
        members: Vec<Member>,
    },
}

impl Declaration {
    /// Get the declared name
    pub fn name(&self) -> &str {
        match self {
            Declaration::Enum { name, .. }
            | Declaration::Struct { name, .. }
            | Declaration::Interface { name, .. } => name,
        }
    }

    /// The introducing keyword: `enum`, `struct` or `interface`
    pub fn keyword(&self) -> &'static str {
        match self {
            Declaration::Enum { .. } => "enum",
            Declaration::Struct { .. } => "struct",
            Declaration::Interface { .. } => "interface",
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Declaration>", into = "Vec<Declaration>")]
pub struct Program {
    declarations: Vec<Declaration>,
    // name -> index of the first declaration with that name
    index: FxHashMap<String, usize>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Append a declaration, keeping source order.
    pub fn push(&mut self, decl: Declaration) {
        self.index
            .entry(decl.name().to_string())
            .or_insert(self.declarations.len());
        self.declarations.push(decl);
    }

    /// Look up a declaration by name. With duplicate names the first one wins.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.index.get(name).map(|&i| &self.declarations[i])
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn into_declarations(self) -> Vec<Declaration> {
        self.declarations
    }
}

impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.declarations == other.declarations
    }
}

impl Eq for Program {}

impl From<Vec<Declaration>> for Program {
    fn from(declarations: Vec<Declaration>) -> Self {
        declarations.into_iter().collect()
    }
}

impl From<Program> for Vec<Declaration> {
    fn from(program: Program) -> Self {
        program.declarations
    }
}

impl FromIterator<Declaration> for Program {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        let mut program = Program::new();
        for decl in iter {
            program.push(decl);
        }
        program
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}
