use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The name the top-level expression is bound to.
///
/// Executing a program leaves the rebuilt value under this name.
pub const OUTPUT_NAME: &str = "retval";

// -----------------------------------------------------------------------------
// Builtin

/// Global singletons, available in every program without an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Builtin {
    None,
    True,
    False,
}

impl Builtin {
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::True => "true",
            Self::False => "false",
        }
    }

    pub const fn to_value(self) -> Value {
        match self {
            Self::None => Value::None,
            Self::True => Value::Bool(true),
            Self::False => Value::Bool(false),
        }
    }
}

// -----------------------------------------------------------------------------
// Expr

/// An expression of a generated program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Str(String),
    Builtin(Builtin),
    /// A name bound by an import, a definition or an assignment.
    Name(String),
    /// `value::attr`, used to reach types and sub-modules.
    Attribute { value: Box<Expr>, attr: String },
    Set(Vec<Expr>),
    Map(Vec<(Expr, Expr)>),
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<(String, Expr)>,
    },
    /// A bare instance of the type the operand evaluates to.
    Allocate(Box<Expr>),
}

impl Expr {
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    #[inline]
    pub fn attribute(self, attr: impl Into<String>) -> Self {
        Self::Attribute {
            value: Box::new(self),
            attr: attr.into(),
        }
    }

    #[inline]
    pub fn call(self, args: Vec<Expr>, keywords: Vec<(String, Expr)>) -> Self {
        Self::Call {
            func: Box::new(self),
            args,
            keywords,
        }
    }

    /// A call of `name` without arguments.
    #[inline]
    pub fn invoke(name: impl Into<String>) -> Self {
        Self::name(name).call(Vec::new(), Vec::new())
    }

    #[inline]
    pub fn allocate(self) -> Self {
        Self::Allocate(Box::new(self))
    }
}

// -----------------------------------------------------------------------------
// Stmt

/// A statement of a generated program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Assign { target: String, value: Expr },
    /// Replaces all attributes of the object bound to `target` with the
    /// mapping `value` evaluates to.
    SetAttributes { target: String, value: Expr },
    Return(Expr),
}

impl Stmt {
    #[inline]
    pub fn assign(target: impl Into<String>, value: Expr) -> Self {
        Self::Assign {
            target: target.into(),
            value,
        }
    }

    #[inline]
    pub fn set_attributes(target: impl Into<String>, value: Expr) -> Self {
        Self::SetAttributes {
            target: target.into(),
            value,
        }
    }

    #[inline]
    pub const fn is_return(&self) -> bool {
        matches!(self, Self::Return(_))
    }
}

// -----------------------------------------------------------------------------
// FunctionDef / ProgramUnit

/// A zero-argument function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub body: Vec<Stmt>,
}

/// A complete generated program.
///
/// Executed in order: imports, definitions, preamble, binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramUnit {
    /// Module paths, sorted and without duplicates.
    pub imports: Vec<String>,
    /// In creation order; a definition only refers to earlier ones.
    pub definitions: Vec<FunctionDef>,
    pub preamble: Vec<Stmt>,
    /// `OUTPUT_NAME = <top-level expression>`.
    pub binding: Stmt,
}

impl ProgramUnit {
    /// Returns the definition with the given name.
    pub fn definition(&self, name: &str) -> Option<&FunctionDef> {
        self.definitions.iter().find(|def| def.name == name)
    }
}

// -----------------------------------------------------------------------------
// Display

struct Indent<'a>(&'a Stmt);

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Str(value) => write!(f, "{value:?}"),
            Self::Builtin(builtin) => f.write_str(builtin.name()),
            Self::Name(name) => f.write_str(name),
            Self::Attribute { value, attr } => write!(f, "{value}::{attr}"),
            Self::Set(items) => {
                f.write_str("#{")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Call {
                func,
                args,
                keywords,
            } => {
                write!(f, "{func}(")?;
                let mut first = true;
                for arg in args {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{arg}")?;
                }
                for (name, value) in keywords {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{name} = {value}")?;
                }
                f.write_str(")")
            }
            Self::Allocate(ty) => write!(f, "alloc {ty}"),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign { target, value } => write!(f, "let {target} = {value};"),
            Self::SetAttributes { target, value } => {
                write!(f, "set_attributes({target}, {value});")
            }
            Self::Return(value) => write!(f, "return {value};"),
        }
    }
}

impl fmt::Display for Indent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    {}", self.0)
    }
}

/// Renders the program as source text, one statement per line.
///
/// ```
/// use cp_reflect::codegen::{EncodeConfig, generate_program};
/// use cp_reflect::value::{Value, ValueMap};
///
/// let map: ValueMap = [(Value::from("a"), Value::from(1.5))].into_iter().collect();
/// let program = generate_program(&Value::from(map), &EncodeConfig::default()).unwrap();
///
/// assert_eq!(program.to_string(), "let retval = {\"a\": 1.5};\n");
/// ```
impl fmt::Display for ProgramUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for import in &self.imports {
            writeln!(f, "use {import};")?;
        }
        if !self.imports.is_empty() {
            writeln!(f)?;
        }
        for def in &self.definitions {
            writeln!(f, "fn {}() {{", def.name)?;
            for stmt in &def.body {
                writeln!(f, "{}", Indent(stmt))?;
            }
            writeln!(f, "}}\n")?;
        }
        for stmt in &self.preamble {
            writeln!(f, "{stmt}")?;
        }
        writeln!(f, "{}", self.binding)
    }
}
