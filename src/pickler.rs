use alloc::string::{String, ToString};
use alloc::vec::Vec;
use std::io::{Read, Write};
use std::sync::OnceLock;

use cp_reflect::codegen::ProgramUnit;
use cp_reflect::registry::{TypeRegistry, TypeRegistryArc};
use cp_reflect::value::Value;
use cp_vm::{Executable, Vm, container};

use crate::{Config, Error};

/// The registry used by [`deserialize`](crate::deserialize) and
/// [`load`](crate::load).
///
/// Created on first use from every type marked `#[object(auto_register)]`.
/// More types can be added through [`TypeRegistryArc::write`].
pub fn global_registry() -> &'static TypeRegistryArc {
    static REGISTRY: OnceLock<TypeRegistryArc> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = TypeRegistry::new();
        registry.auto_register();
        log::debug!("global registry created with {} types", registry.len());
        TypeRegistryArc::new(registry)
    })
}

// -----------------------------------------------------------------------------
// Pickler

/// Serializes values as programs, and runs such programs to get them back.
///
/// # Examples
///
/// ```
/// use cp_core::Pickler;
/// use cp_core::reflect::derive::Object;
/// use cp_core::reflect::registry::{TypeRegistry, TypeRegistryArc};
/// use cp_core::reflect::value::Value;
///
/// #[derive(Object, Default, Clone, PartialEq, Debug)]
/// #[object(type_path = "shapes::Circle")]
/// struct Circle {
///     radius: f64,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Circle>();
/// let pickler = Pickler::new(TypeRegistryArc::new(registry));
///
/// let value = Value::object(Circle { radius: 1.5 });
/// let bytes = pickler.serialize(&value).unwrap();
/// assert_eq!(pickler.deserialize(&bytes).unwrap(), value);
/// ```
#[derive(Debug, Clone)]
pub struct Pickler {
    config: Config,
    registry: TypeRegistryArc,
}

impl Pickler {
    #[inline]
    pub fn new(registry: TypeRegistryArc) -> Self {
        Self::with_config(registry, Config::default())
    }

    #[inline]
    pub const fn with_config(registry: TypeRegistryArc, config: Config) -> Self {
        Self { config, registry }
    }

    /// A pickler over the [`global_registry`].
    #[inline]
    pub fn global() -> Self {
        Self::new(global_registry().clone())
    }

    #[inline]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub const fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    /// Encodes `value` into a program unit.
    #[inline]
    pub fn generate_program(&self, value: &Value) -> Result<ProgramUnit, Error> {
        Ok(cp_reflect::codegen::generate_program(value, &self.config.encode)?)
    }

    /// Renders the program unit of `value` as text.
    pub fn generate_code(&self, value: &Value) -> Result<String, Error> {
        Ok(self.generate_program(value)?.to_string())
    }

    /// Encodes and compiles `value`.
    pub fn compile(&self, value: &Value) -> Result<Executable, Error> {
        Ok(cp_vm::compile(&self.generate_program(value)?)?)
    }

    /// Runs `executable` against the registry, returning the rebuilt value.
    pub fn execute(&self, executable: &Executable) -> Result<Value, Error> {
        let registry = self.registry.read();
        let vm = Vm::with_config(&registry, self.config.exec.clone());
        Ok(vm.execute(executable)?)
    }

    pub fn serialize(&self, value: &Value) -> Result<Vec<u8>, Error> {
        Ok(container::to_bytes(&self.compile(value)?)?)
    }

    pub fn deserialize(&self, bytes: &[u8]) -> Result<Value, Error> {
        self.execute(&container::from_bytes(bytes)?)
    }

    /// Serializes `value` into `writer`.
    pub fn dump(&self, value: &Value, writer: impl Write) -> Result<(), Error> {
        Ok(container::write_to(&self.compile(value)?, writer)?)
    }

    /// Deserializes a value from `reader`, reading it to the end.
    pub fn load(&self, reader: impl Read) -> Result<Value, Error> {
        self.execute(&container::read_from(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;

    use cp_reflect::codegen::{
        Encode, EncodeConfig, EncodeError, Expr, HookOutput, OUTPUT_NAME, Session, Stmt,
    };
    use cp_reflect::derive::{Object, TypePath};
    use cp_reflect::object::{Construction, ObjectError};
    use cp_reflect::registry::{TypeRegistry, TypeRegistryArc};
    use cp_reflect::value::{Value, ValueMap, ValueSet};
    use cp_reflect::Object;

    use super::Pickler;
    use crate::{Config, Error};

    /// Rebuilt through its constructor, from the amount alone.
    #[derive(Object, Clone, PartialEq, Debug)]
    #[object(type_path = "bank::Money", construct, encode)]
    struct Money {
        cents: i64,
    }

    impl Encode for Money {
        fn encode(&self, session: &mut Session) -> Result<HookOutput, EncodeError> {
            let fragment = session.constructor_call(self, &[Value::Int(self.cents)], &[])?;
            Ok(fragment.into())
        }
    }

    /// No hook, no constructor: allocated then filled.
    #[derive(Object, Default, Clone, PartialEq, Debug)]
    #[object(type_path = "bank::ledger::Entry")]
    struct Entry {
        memo: String,
        amount: f64,
        tags: ValueSet,
    }

    /// Fields whose value forms are narrower than their Rust types.
    #[derive(Object, Default, Clone, PartialEq, Debug)]
    #[object(type_path = "bank::Counter")]
    struct Counter {
        hits: u64,
        nested: Option<Option<i64>>,
    }

    /// Rebuilt by a function body computing the balance.
    #[derive(Object, Clone, PartialEq, Debug)]
    #[object(type_path = "bank::Account", construct, encode)]
    struct Account {
        owner: String,
        balance: Value,
    }

    impl Encode for Account {
        fn encode(&self, session: &mut Session) -> Result<HookOutput, EncodeError> {
            let local = session.unique_name("account");
            let call = session.constructor_call(
                self,
                &[Value::from(self.owner.as_str()), self.balance.clone()],
                &[],
            )?;

            let mut body = call.statements;
            body.push(Stmt::assign(local.clone(), call.expr));
            body.push(Stmt::Return(Expr::name(local)));
            Ok(HookOutput::body(body))
        }
    }

    /// Every visit yields a fresh copy of itself, like a cyclic graph.
    #[derive(TypePath, Clone)]
    #[object(type_path = "bank::Loop")]
    struct Loop;

    impl Object for Loop {
        fn construction(&self) -> Construction {
            Construction::Allocate
        }
        fn attributes(&self) -> Result<Option<ValueMap>, ObjectError> {
            Ok(Some([(Value::from("next"), Value::object(Loop))].into_iter().collect()))
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

    fn pickler() -> Pickler {
        let mut registry = TypeRegistry::new();
        registry.register::<Money>();
        registry.register::<Entry>();
        Pickler::new(TypeRegistryArc::new(registry))
    }

    fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
        entries
            .into_iter()
            .map(|(key, value)| (Value::from(key), value))
            .collect::<ValueMap>()
            .into()
    }

    #[test]
    fn hook_object_in_a_map() {
        let pickler = pickler();
        let value = map([("a", Value::from(2123)), ("b", Value::object(Money { cents: 995 }))]);

        let program = pickler.generate_program(&value).unwrap();
        assert_eq!(program.imports, ["bank"]);
        assert!(program.definitions.is_empty());

        let bytes = pickler.serialize(&value).unwrap();
        assert_eq!(pickler.deserialize(&bytes).unwrap(), value);
    }

    #[test]
    fn hook_body_becomes_a_function() {
        let mut registry = TypeRegistry::new();
        registry.register::<Account>();
        registry.register::<Money>();
        let pickler = Pickler::new(TypeRegistryArc::new(registry));

        let account = Value::object(Account {
            owner: String::from("Ada"),
            balance: Value::object(Money { cents: 12 }),
        });
        let program = pickler.generate_program(&account).unwrap();
        assert_eq!(program.definitions.len(), 1);
        assert_eq!(
            program.binding,
            Stmt::assign(OUTPUT_NAME, Expr::invoke(program.definitions[0].name.clone()))
        );

        let bytes = pickler.serialize(&account).unwrap();
        assert_eq!(pickler.deserialize(&bytes).unwrap(), account);
    }

    #[test]
    fn fallback_round_trip() {
        let pickler = pickler();
        let entry = Value::object(Entry {
            memo: String::from("rent"),
            amount: -450.25,
            tags: [Value::from("home"), Value::None].into_iter().collect(),
        });
        let value: Value = [entry.clone(), Value::from(7)].into_iter().collect::<ValueSet>().into();

        let bytes = pickler.serialize(&value).unwrap();
        assert_eq!(pickler.deserialize(&bytes).unwrap(), value);
    }

    #[test]
    fn wide_fields_rebuild_exactly_or_fail() {
        let mut registry = TypeRegistry::new();
        registry.register::<Counter>();
        let pickler = Pickler::new(TypeRegistryArc::new(registry));

        for counter in [
            Counter { hits: i64::MAX as u64, nested: Some(Some(-1)) },
            Counter { hits: 0, nested: None },
        ] {
            let bytes = pickler.serialize(&Value::object(counter.clone())).unwrap();
            let Value::Object(rebuilt) = pickler.deserialize(&bytes).unwrap() else {
                panic!("expected an object");
            };
            assert_eq!(rebuilt.downcast_ref::<Counter>(), Some(&counter));
        }

        for counter in [
            Counter { hits: u64::MAX, nested: None },
            Counter { hits: 1, nested: Some(None) },
        ] {
            let err = pickler.serialize(&Value::object(counter)).unwrap_err();
            assert!(matches!(
                err,
                Error::Encode(EncodeError::Attributes(ObjectError::InvalidAttribute {
                    type_path: "bank::Counter",
                    ..
                }))
            ));
        }
    }

    #[test]
    fn self_reference_hits_the_limit() {
        let pickler = Pickler::with_config(
            TypeRegistryArc::default(),
            Config::new().with_encode(EncodeConfig::new().with_max_depth(16)),
        );
        let err = pickler.serialize(&Value::object(Loop)).unwrap_err();
        assert!(matches!(
            err,
            Error::Encode(EncodeError::RecursionLimit { limit: 16 })
        ));
    }

    #[test]
    fn code_is_deterministic() {
        let pickler = pickler();
        let value = map([
            ("entry", Value::object(Entry::default())),
            ("money", Value::object(Money { cents: 1 })),
            ("nested", map([("x", Value::from(1.5))])),
        ]);

        let first = pickler.generate_code(&value).unwrap();
        assert_eq!(first, pickler.generate_code(&value).unwrap());
        assert!(first.starts_with("use bank;\nuse bank::ledger;\n"));
    }

    #[test]
    fn dump_and_load() {
        let pickler = pickler();
        let value = map([("money", Value::object(Money { cents: -3 }))]);

        let mut buffer = Vec::new();
        pickler.dump(&value, &mut buffer).unwrap();
        assert_eq!(pickler.load(buffer.as_slice()).unwrap(), value);
    }

    #[test]
    fn unregistered_types_fail_at_execution() {
        let bytes = pickler().serialize(&Value::object(Money { cents: 5 })).unwrap();
        let err = Pickler::new(TypeRegistryArc::default())
            .deserialize(&bytes)
            .unwrap_err();
        assert!(matches!(err, Error::Exec(cp_vm::ExecError::ModuleNotFound { .. })));
    }
}
