use crate::Object;
use crate::codegen::{EncodeError, Expr, Session};
use crate::info::{TypePath, TypePathTable, module_segments};

impl Session {
    /// Returns an expression that evaluates to the type of `object`, and
    /// records its module as an import.
    ///
    /// The expression is a chain of attribute accesses from the root module,
    /// e.g. `zoo::birds::Owl` becomes `Name("zoo")::birds::Owl`.
    ///
    /// # Errors
    ///
    /// Fails with [`EncodeError::Unsupported`] if the type has no module path.
    ///
    /// ```
    /// use cp_reflect::codegen::{Expr, Session};
    /// use cp_reflect::derive::Object;
    ///
    /// #[derive(Object, Default, Clone)]
    /// #[object(type_path = "zoo::birds::Owl")]
    /// struct Owl;
    ///
    /// let mut session = Session::new();
    /// let reference = session.type_reference(&Owl).unwrap();
    ///
    /// assert_eq!(reference, Expr::name("zoo").attribute("birds").attribute("Owl"));
    /// assert!(session.imports().eq(["zoo::birds"]));
    /// ```
    pub fn type_reference(&mut self, object: &dyn Object) -> Result<Expr, EncodeError> {
        self.reference(
            object.reflect_type_path(),
            object.reflect_type_name(),
            object.reflect_module_path(),
        )
    }

    /// Like [`type_reference`](Session::type_reference), for a static type.
    pub fn type_reference_of<T: TypePath>(&mut self) -> Result<Expr, EncodeError> {
        let table = TypePathTable::of::<T>();
        self.reference(table.path(), table.name(), table.module_path())
    }

    fn reference(
        &mut self,
        type_path: &'static str,
        type_name: &'static str,
        module_path: Option<&'static str>,
    ) -> Result<Expr, EncodeError> {
        let unsupported = EncodeError::Unsupported {
            type_path,
            reason: "the type has no module path",
        };
        let Some(module) = module_path else {
            return Err(unsupported);
        };

        let mut segments = module_segments(module);
        let Some(root) = segments.next() else {
            return Err(unsupported);
        };

        let expr = segments.fold(Expr::name(root), |expr, segment| expr.attribute(segment));
        self.add_import(module);
        Ok(expr.attribute(type_name))
    }
}

#[cfg(test)]
mod tests {
    use crate::codegen::{EncodeError, Expr, Session};
    use crate::info::TypePath;

    struct Rootless;

    impl TypePath for Rootless {
        fn type_path() -> &'static str {
            "Rootless"
        }
        fn type_name() -> &'static str {
            "Rootless"
        }
    }

    struct Shallow;

    impl TypePath for Shallow {
        fn type_path() -> &'static str {
            "top::Shallow"
        }
        fn type_name() -> &'static str {
            "Shallow"
        }
        fn module_path() -> Option<&'static str> {
            Some("top")
        }
    }

    #[test]
    fn missing_module_is_unsupported() {
        let mut session = Session::new();
        assert!(matches!(
            session.type_reference_of::<Rootless>(),
            Err(EncodeError::Unsupported {
                type_path: "Rootless",
                ..
            })
        ));
        assert_eq!(session.imports().len(), 0);
    }

    #[test]
    fn single_segment_module() {
        let mut session = Session::new();
        let first = session.type_reference_of::<Shallow>().unwrap();
        let second = session.type_reference_of::<Shallow>().unwrap();

        assert_eq!(first, Expr::name("top").attribute("Shallow"));
        assert_eq!(first, second);
        assert!(session.imports().eq(["top"]));
    }
}
