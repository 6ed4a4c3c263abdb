//! Compile and run the programs produced by `cp_reflect::codegen`.
//!
//! A [`ProgramUnit`](cp_reflect::codegen::ProgramUnit) is first checked and
//! lowered to an [`Executable`] by [`compile`]. The executable can be stored
//! in a versioned binary [`container`], and is run by a [`Vm`] that rebuilds
//! objects through a [`TypeRegistry`](cp_reflect::registry::TypeRegistry).
//!
//! ```
//! use cp_reflect::codegen::{EncodeConfig, generate_program};
//! use cp_reflect::registry::TypeRegistry;
//! use cp_reflect::value::Value;
//!
//! let value = Value::from(2123);
//! let program = generate_program(&value, &EncodeConfig::default()).unwrap();
//!
//! let bytes = cp_vm::container::to_bytes(&cp_vm::compile(&program).unwrap()).unwrap();
//! let executable = cp_vm::container::from_bytes(&bytes).unwrap();
//!
//! let registry = TypeRegistry::new();
//! assert_eq!(cp_vm::execute(&executable, &registry).unwrap(), value);
//! ```

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod bytecode;
mod compiler;
mod config;
mod error;
mod vm;

pub mod container;

// -----------------------------------------------------------------------------
// Exports

pub use bytecode::{CodeObject, Const, Executable, Instruction};
pub use compiler::compile;
pub use config::ExecConfig;
pub use error::{CompileError, ContainerError, ExecError};
pub use vm::{Vm, execute};

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use cp_reflect::codegen::{EncodeConfig, Expr, FunctionDef, OUTPUT_NAME, ProgramUnit, Stmt};
    use cp_reflect::codegen::generate_program;
    use cp_reflect::derive::Object;
    use cp_reflect::registry::TypeRegistry;
    use cp_reflect::value::{Value, ValueMap, ValueSet};

    use crate::{ExecConfig, ExecError, Vm, compile, container, execute};

    #[derive(Object, Default, Clone, PartialEq, Debug)]
    #[object(type_path = "zoo::birds::Owl")]
    struct Owl {
        name: String,
        age: i64,
    }

    #[derive(Object, Clone, PartialEq, Debug)]
    #[object(type_path = "zoo::Keeper", construct)]
    struct Keeper {
        name: String,
        owls: ValueSet,
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register::<Owl>();
        registry.register::<Keeper>();
        registry
    }

    fn round_trip(value: &Value, registry: &TypeRegistry) -> Result<Value, ExecError> {
        let program = generate_program(value, &EncodeConfig::default()).unwrap();
        let executable = compile(&program).unwrap();
        let bytes = container::to_bytes(&executable).unwrap();
        execute(&container::from_bytes(&bytes).unwrap(), registry)
    }

    fn owl(name: &str, age: i64) -> Value {
        Value::object(Owl {
            name: String::from(name),
            age,
        })
    }

    #[test]
    fn rebuilds_nested_objects() {
        let keeper = Value::object(Keeper {
            name: String::from("Ada"),
            owls: [owl("Hoot", 3), owl("Screech", 5)].into_iter().collect(),
        });
        let value: Value = [(Value::from("keeper"), keeper), (Value::from("open"), Value::from(true))]
            .into_iter()
            .collect::<ValueMap>()
            .into();

        assert_eq!(round_trip(&value, &registry()).unwrap(), value);
    }

    #[test]
    fn rebuilds_scalars() {
        let registry = TypeRegistry::new();
        for value in [Value::None, Value::from(-7), Value::from(1.25), Value::from("text")] {
            assert_eq!(round_trip(&value, &registry).unwrap(), value);
        }
    }

    #[test]
    fn unregistered_module() {
        let err = round_trip(&owl("Hoot", 1), &TypeRegistry::new()).unwrap_err();
        assert_eq!(
            err,
            ExecError::ModuleNotFound {
                module: String::from("zoo::birds")
            }
        );
    }

    #[test]
    fn missing_output() {
        let program = ProgramUnit {
            imports: Vec::new(),
            definitions: Vec::new(),
            preamble: Vec::new(),
            binding: Stmt::assign("other", Expr::Int(1)),
        };
        let executable = compile(&program).unwrap();
        assert_eq!(
            execute(&executable, &TypeRegistry::new()),
            Err(ExecError::NameNotBound { name: OUTPUT_NAME })
        );
    }

    #[test]
    fn output_must_be_a_value() {
        let program = ProgramUnit {
            imports: vec![String::from("zoo")],
            definitions: Vec::new(),
            preamble: Vec::new(),
            binding: Stmt::assign(OUTPUT_NAME, Expr::name("zoo").attribute("Keeper")),
        };
        let executable = compile(&program).unwrap();
        assert!(matches!(
            execute(&executable, &registry()),
            Err(ExecError::NotAValue { .. })
        ));
    }

    #[test]
    fn construct_only_types_cannot_be_allocated() {
        let program = ProgramUnit {
            imports: vec![String::from("zoo")],
            definitions: Vec::new(),
            preamble: Vec::new(),
            binding: Stmt::assign(OUTPUT_NAME, Expr::name("zoo").attribute("Keeper").allocate()),
        };
        let executable = compile(&program).unwrap();
        assert_eq!(
            execute(&executable, &registry()),
            Err(ExecError::CannotAllocate {
                type_path: "zoo::Keeper"
            })
        );
    }

    #[test]
    fn unknown_attribute() {
        let program = ProgramUnit {
            imports: vec![String::from("zoo")],
            definitions: Vec::new(),
            preamble: Vec::new(),
            binding: Stmt::assign(OUTPUT_NAME, Expr::name("zoo").attribute("Penguin")),
        };
        let executable = compile(&program).unwrap();
        assert!(matches!(
            execute(&executable, &registry()),
            Err(ExecError::NoAttribute { .. })
        ));
    }

    #[test]
    fn call_depth_is_limited() {
        // func_3 calls func_2, which calls func_1.
        let definitions = (1..=3)
            .map(|i| FunctionDef {
                name: alloc::format!("func_{i}"),
                body: vec![Stmt::Return(if i == 1 {
                    Expr::Int(0)
                } else {
                    Expr::invoke(alloc::format!("func_{}", i - 1))
                })],
            })
            .collect();
        let program = ProgramUnit {
            imports: Vec::new(),
            definitions,
            preamble: Vec::new(),
            binding: Stmt::assign(OUTPUT_NAME, Expr::invoke("func_3")),
        };
        let executable = compile(&program).unwrap();
        let registry = TypeRegistry::new();

        assert_eq!(execute(&executable, &registry), Ok(Value::Int(0)));

        let vm = Vm::with_config(&registry, ExecConfig::new().with_max_call_depth(2));
        assert_eq!(vm.execute(&executable), Err(ExecError::CallDepth { limit: 2 }));
    }
}
