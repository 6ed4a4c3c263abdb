use alloc::string::String;
use alloc::vec::Vec;

use crate::Object;
use crate::codegen::{Encode, EncodeError, Expr, Fragment, HookOutput, Session, Stmt};
use crate::object::Construction;
use crate::value::{Value, ValueKind, ValueMap, ValueSet};

impl Session {
    /// Encodes a value into a [`Fragment`].
    ///
    /// Dispatches on [`Value::kind`]:
    ///
    /// - scalars and singletons become literals;
    /// - sets and maps encode their elements (keys before values) and
    ///   concatenate the element statements in order;
    /// - objects with a hook are encoded by the hook;
    /// - other objects are rebuilt from their attributes, see [`Construction`].
    ///
    /// # Errors
    ///
    /// - [`EncodeError::RecursionLimit`] if the value nests deeper than
    ///   [`EncodeConfig::max_depth`](crate::codegen::EncodeConfig::max_depth).
    /// - [`EncodeError::Unsupported`] for objects that cannot be rebuilt.
    /// - [`EncodeError::Attributes`] for attributes without a faithful value.
    /// - Any error raised by a hook.
    pub fn encode(&mut self, value: &Value) -> Result<Fragment, EncodeError> {
        if self.depth >= self.config.max_depth {
            return Err(EncodeError::RecursionLimit {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        let result = self.encode_kind(value.kind());
        self.depth -= 1;
        result
    }

    fn encode_kind(&mut self, kind: ValueKind<'_>) -> Result<Fragment, EncodeError> {
        match kind {
            ValueKind::Int(value) => Ok(Fragment::pure(Expr::Int(value))),
            ValueKind::Float(value) => Ok(Fragment::pure(Expr::Float(value))),
            ValueKind::Str(value) => Ok(Fragment::pure(Expr::Str(String::from(value)))),
            ValueKind::Singleton(builtin) => Ok(Fragment::pure(Expr::Builtin(builtin))),
            ValueKind::Set(set) => self.encode_set(set),
            ValueKind::Map(map) => self.encode_map(map),
            ValueKind::Custom(object, hook) => self.encode_hook(object, hook),
            ValueKind::Generic(object) => self.encode_generic(object),
        }
    }

    fn encode_set(&mut self, set: &ValueSet) -> Result<Fragment, EncodeError> {
        let mut statements = Vec::new();
        let mut items = Vec::with_capacity(set.len());
        for item in set.iter() {
            let fragment = self.encode(item)?;
            statements.extend(fragment.statements);
            items.push(fragment.expr);
        }
        Ok(Fragment::new(statements, Expr::Set(items)))
    }

    fn encode_map(&mut self, map: &ValueMap) -> Result<Fragment, EncodeError> {
        let mut statements = Vec::new();
        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map.iter() {
            let key = self.encode(key)?;
            let value = self.encode(value)?;
            statements.extend(key.statements);
            statements.extend(value.statements);
            entries.push((key.expr, value.expr));
        }
        Ok(Fragment::new(statements, Expr::Map(entries)))
    }

    fn encode_hook(&mut self, object: &dyn Object, hook: &dyn Encode) -> Result<Fragment, EncodeError> {
        match hook.encode(self)? {
            HookOutput::Fragment(fragment) => Ok(fragment),
            HookOutput::Body { preamble, body } => {
                log::trace!("wrapping hook body of `{}`", object.reflect_type_path());
                self.wrap(preamble, body)
            }
        }
    }

    /// Rebuilds an object without a hook from its attribute mapping.
    fn encode_generic(&mut self, object: &dyn Object) -> Result<Fragment, EncodeError> {
        let type_path = object.reflect_type_path();
        let Some(attributes) = object.attributes().map_err(EncodeError::Attributes)? else {
            return Err(EncodeError::Unsupported {
                type_path,
                reason: "the object has no attribute mapping",
            });
        };

        match object.construction() {
            Construction::Allocate => {
                let class = self.type_reference(object)?;
                // The mapping shares the depth level of its object.
                let Fragment { statements, expr } = self.encode_map(&attributes)?;
                let instance = self.unique_name("obj");

                let mut body = Vec::with_capacity(statements.len() + 3);
                body.push(Stmt::assign(instance.clone(), class.allocate()));
                body.extend(statements);
                body.push(Stmt::set_attributes(instance.clone(), expr));
                body.push(Stmt::Return(Expr::Name(instance)));
                self.wrap(Vec::new(), body)
            }
            Construction::Construct => {
                let class = self.type_reference(object)?;
                let mut statements = Vec::new();
                let mut keywords = Vec::with_capacity(attributes.len());
                for (key, value) in attributes.iter() {
                    let Value::Str(name) = key else {
                        return Err(EncodeError::Unsupported {
                            type_path,
                            reason: "attribute names must be strings to be passed as keywords",
                        });
                    };
                    let fragment = self.encode(value)?;
                    statements.extend(fragment.statements);
                    keywords.push((name.clone(), fragment.expr));
                }
                Ok(Fragment::new(statements, class.call(Vec::new(), keywords)))
            }
            Construction::Unsupported => Err(EncodeError::Unsupported {
                type_path,
                reason: "the type can be neither allocated nor constructed",
            }),
        }
    }

    /// Encodes a call of the type of `object` with the given arguments.
    ///
    /// Statements of the encoded arguments are concatenated, positional
    /// arguments first.
    pub fn constructor_call(
        &mut self,
        object: &dyn Object,
        args: &[Value],
        keywords: &[(&str, Value)],
    ) -> Result<Fragment, EncodeError> {
        let class = self.type_reference(object)?;
        let mut statements = Vec::new();

        let mut arg_exprs = Vec::with_capacity(args.len());
        for arg in args {
            let fragment = self.encode(arg)?;
            statements.extend(fragment.statements);
            arg_exprs.push(fragment.expr);
        }

        let mut keyword_exprs = Vec::with_capacity(keywords.len());
        for (name, value) in keywords {
            let fragment = self.encode(value)?;
            statements.extend(fragment.statements);
            keyword_exprs.push((String::from(*name), fragment.expr));
        }

        Ok(Fragment::new(statements, class.call(arg_exprs, keyword_exprs)))
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Object;
    use crate::codegen::{
        Encode, EncodeConfig, EncodeError, Expr, HookOutput, Session, Stmt,
    };
    use crate::derive::{Object, TypePath};
    use crate::object::{Construction, ObjectError};
    use crate::value::{Value, ValueMap, ValueSet};

    #[derive(Object, Default, Clone, PartialEq, Debug)]
    #[object(type_path = "geo::Point")]
    struct Point {
        x: i64,
        y: i64,
    }

    #[derive(Object, Clone, PartialEq, Debug)]
    #[object(type_path = "geo::Label", construct)]
    struct Label {
        text: String,
    }

    /// Rebuilt by a function computing the total at run time.
    #[derive(Object, Clone, PartialEq, Debug)]
    #[object(type_path = "geo::Total", construct, encode)]
    struct Total {
        value: i64,
    }

    impl Encode for Total {
        fn encode(&self, session: &mut Session) -> Result<HookOutput, EncodeError> {
            let local = session.unique_name("total");
            let call = session.constructor_call(self, &[Value::Int(self.value)], &[])?;
            let mut body = call.statements;
            body.push(Stmt::assign(local.clone(), call.expr));
            body.push(Stmt::Return(Expr::name(local)));
            Ok(HookOutput::body(body))
        }
    }

    /// Every visit yields a fresh copy of itself, like a cyclic graph.
    #[derive(TypePath, Clone)]
    #[object(type_path = "geo::Loop")]
    struct Loop;

    impl Object for Loop {
        fn construction(&self) -> Construction {
            Construction::Allocate
        }
        fn attributes(&self) -> Result<Option<ValueMap>, ObjectError> {
            Ok(Some([(Value::from("me"), Value::object(Loop))].into_iter().collect()))
        }
        fn set_attributes(&mut self, _: ValueMap) -> Result<(), ObjectError> {
            Ok(())
        }
        fn clone_object(&self) -> Box<dyn Object> {
            Box::new(Loop)
        }
        fn object_eq(&self, other: &dyn Object) -> bool {
            other.is::<Loop>()
        }
    }

    #[test]
    fn scalars_are_pure() {
        let mut session = Session::new();
        for value in [Value::from(1), Value::from(0.5), Value::from("s"), Value::None] {
            assert!(session.encode(&value).unwrap().is_pure());
        }
        assert!(session.definitions().is_empty());
        assert_eq!(session.depth(), 0);
    }

    #[test]
    fn allocate_fallback_wraps_a_function() {
        let mut session = Session::new();
        let fragment = session.encode(&Value::object(Point { x: 1, y: 2 })).unwrap();

        assert!(fragment.is_pure());
        assert_eq!(fragment.expr, Expr::invoke("func_00000002"));

        let def = &session.definitions()[0];
        assert_eq!(def.name, "func_00000002");
        assert_eq!(
            def.body[0],
            Stmt::assign(
                "obj_00000001",
                Expr::name("geo").attribute("Point").allocate()
            )
        );
        assert!(matches!(def.body[1], Stmt::SetAttributes { ref target, .. } if target == "obj_00000001"));
        assert_eq!(def.body[2], Stmt::Return(Expr::name("obj_00000001")));
        assert!(session.imports().eq(["geo"]));
    }

    #[test]
    fn construct_fallback_is_a_call() {
        let mut session = Session::new();
        let label = Label {
            text: String::from("hi"),
        };
        let fragment = session.encode(&Value::object(label)).unwrap();

        assert_eq!(
            fragment.expr,
            Expr::name("geo").attribute("Label").call(
                Vec::new(),
                vec![(String::from("text"), Expr::Str(String::from("hi")))]
            )
        );
        assert!(session.definitions().is_empty());
    }

    #[test]
    fn hook_body_is_wrapped() {
        let mut session = Session::new();
        let fragment = session.encode(&Value::object(Total { value: 9 })).unwrap();

        assert_eq!(fragment.expr, Expr::invoke("func_00000002"));
        assert_eq!(session.definitions().len(), 1);
        assert_eq!(session.definitions()[0].body.len(), 2);
    }

    #[test]
    fn cyclic_graph_hits_the_limit() {
        let mut session = Session::with_config(EncodeConfig::default().with_max_depth(32));
        let err = session.encode(&Value::object(Loop)).unwrap_err();

        assert_eq!(err, EncodeError::RecursionLimit { limit: 32 });
        assert_eq!(session.depth(), 0);
    }

    #[test]
    fn objects_count_one_level() {
        // An object and a map with the same entries nest equally deep.
        let point = Value::object(Point { x: 1, y: 2 });
        let map: ValueMap = [(Value::from("x"), Value::from(1))].into_iter().collect();

        let mut session = Session::with_config(EncodeConfig::default().with_max_depth(2));
        assert!(session.encode(&point).is_ok());
        assert!(session.encode(&Value::Map(map.clone())).is_ok());

        let mut session = Session::with_config(EncodeConfig::default().with_max_depth(1));
        assert_eq!(
            session.encode(&point).unwrap_err(),
            EncodeError::RecursionLimit { limit: 1 }
        );
        assert_eq!(
            session.encode(&Value::Map(map)).unwrap_err(),
            EncodeError::RecursionLimit { limit: 1 }
        );
    }

    #[test]
    fn unconvertible_attribute_fails_encoding() {
        #[derive(Object, Default, Clone, PartialEq, Debug)]
        #[object(type_path = "geo::Counter")]
        struct Counter {
            hits: u64,
        }

        let mut session = Session::new();
        let err = session
            .encode(&Value::object(Counter { hits: u64::MAX }))
            .unwrap_err();
        assert!(matches!(
            err,
            EncodeError::Attributes(ObjectError::InvalidAttribute {
                attribute: "hits",
                ..
            })
        ));
        assert_eq!(session.depth(), 0);
    }

    #[test]
    fn nested_statements_stay_in_order() {
        let mut session = Session::new();
        let set: ValueSet = [Value::object(Point::default())].into_iter().collect();
        let map: ValueMap = [(Value::from("points"), Value::Set(set))].into_iter().collect();
        let fragment = session.encode(&Value::Map(map)).unwrap();

        let Expr::Map(entries) = &fragment.expr else {
            panic!("expected a map literal");
        };
        assert_eq!(entries[0].0, Expr::Str(String::from("points")));
        assert_eq!(
            entries[0].1,
            Expr::Set(vec![Expr::invoke("func_00000002")])
        );
    }
}
