use alloc::vec::Vec;

use crate::codegen::{Expr, Stmt};

/// The encoding of one value.
///
/// Running `statements`, then evaluating `expr`, produces a value equal to the
/// encoded one. `expr` only refers to names bound by `statements`, or to
/// global names (imports, definitions and builtins).
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub statements: Vec<Stmt>,
    pub expr: Expr,
}

impl Fragment {
    #[inline]
    pub const fn new(statements: Vec<Stmt>, expr: Expr) -> Self {
        Self { statements, expr }
    }

    /// A fragment without preparatory statements.
    #[inline]
    pub const fn pure(expr: Expr) -> Self {
        Self {
            statements: Vec::new(),
            expr,
        }
    }

    #[inline]
    pub fn is_pure(&self) -> bool {
        self.statements.is_empty()
    }
}
