use alloc::vec::Vec;

use crate::codegen::{EncodeError, Expr, Fragment, FunctionDef, Session, Stmt};

/// Prefix of the functions created by [`Session::wrap`].
pub const FUNCTION_PREFIX: &str = "func";

impl Session {
    /// Turns a statement list into a zero-argument function, so that a call
    /// expression can stand in for it.
    ///
    /// The function is appended to the session definitions under a fresh
    /// name. The returned fragment runs `preamble`, then calls the function.
    ///
    /// `body` must end with [`Stmt::Return`]; statements of sub-expressions
    /// used inside it must already be part of it.
    ///
    /// ```
    /// use cp_reflect::codegen::{Expr, Session, Stmt};
    ///
    /// let mut session = Session::new();
    /// let fragment = session
    ///     .wrap(Vec::new(), vec![Stmt::Return(Expr::Int(1))])
    ///     .unwrap();
    ///
    /// assert_eq!(fragment.expr, Expr::invoke("func_00000001"));
    /// assert_eq!(session.definitions()[0].name, "func_00000001");
    /// ```
    pub fn wrap(&mut self, preamble: Vec<Stmt>, body: Vec<Stmt>) -> Result<Fragment, EncodeError> {
        let name = self.unique_name(FUNCTION_PREFIX);
        if !body.last().is_some_and(Stmt::is_return) {
            return Err(EncodeError::MissingReturn { function: name });
        }

        log::trace!("define `{name}` with {} statements", body.len());
        self.definitions.push(FunctionDef {
            name: name.clone(),
            body,
        });
        Ok(Fragment::new(preamble, Expr::invoke(name)))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::codegen::{EncodeError, Expr, Session, Stmt};

    #[test]
    fn body_must_end_with_return() {
        let mut session = Session::new();
        let err = session
            .wrap(Vec::new(), vec![Stmt::assign("x", Expr::Int(1))])
            .unwrap_err();

        assert!(matches!(err, EncodeError::MissingReturn { .. }));
        assert!(session.definitions().is_empty());

        let err = session.wrap(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, EncodeError::MissingReturn { .. }));
    }

    #[test]
    fn preamble_stays_outside() {
        let mut session = Session::new();
        let preamble = vec![Stmt::assign("shared", Expr::Int(7))];
        let fragment = session
            .wrap(preamble.clone(), vec![Stmt::Return(Expr::name("shared"))])
            .unwrap();

        assert_eq!(fragment.statements, preamble);
        assert_eq!(session.definitions()[0].body.len(), 1);
    }
}
