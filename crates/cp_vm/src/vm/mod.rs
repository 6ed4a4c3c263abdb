//! The interpreter for compiled executables.

// -----------------------------------------------------------------------------
// Modules

mod slot;

// -----------------------------------------------------------------------------
// Vm

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use cp_reflect::codegen::OUTPUT_NAME;
use cp_reflect::info::module_segments;
use cp_reflect::object::Arguments;
use cp_reflect::registry::{TypeRegistry, TypeTraitAllocate, TypeTraitConstruct};
use cp_reflect::value::{Value, ValueMap, ValueSet};
use cp_utils::hash::HashMap;

use crate::bytecode::{CodeObject, Const, Executable, Instruction};
use crate::config::ExecConfig;
use crate::error::ExecError;

use slot::Slot;

type Namespace<'e, 'r> = HashMap<&'e str, Slot<'r>>;

/// Runs executables against a [`TypeRegistry`].
///
/// Every module a program imports, and every type it reaches, must be known
/// to the registry. Types are instantiated only through the
/// [`TypeTraitAllocate`] and [`TypeTraitConstruct`] type traits.
pub struct Vm<'r> {
    registry: &'r TypeRegistry,
    config: ExecConfig,
}

impl<'r> Vm<'r> {
    #[inline]
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_config(registry, ExecConfig::default())
    }

    #[inline]
    pub const fn with_config(registry: &'r TypeRegistry, config: ExecConfig) -> Self {
        Self { registry, config }
    }

    /// Runs `executable` and returns the value bound to [`OUTPUT_NAME`].
    ///
    /// Each call starts from an empty namespace.
    pub fn execute(&self, executable: &Executable) -> Result<Value, ExecError> {
        let mut frame = Frame {
            vm: self,
            executable,
            globals: HashMap::default(),
        };
        if frame.run(&executable.main, None, 0)?.is_some() {
            return Err(ExecError::InvalidBytecode {
                reason: "return outside of a function",
            });
        }

        let output = frame
            .globals
            .remove(OUTPUT_NAME)
            .ok_or(ExecError::NameNotBound { name: OUTPUT_NAME })?;
        log::debug!("executed program, output is {}", output.describe());
        output.into_value()
    }
}

/// Runs `executable` with the default limits.
#[inline]
pub fn execute(executable: &Executable, registry: &TypeRegistry) -> Result<Value, ExecError> {
    Vm::new(registry).execute(executable)
}

// -----------------------------------------------------------------------------
// Frame

struct Frame<'v, 'e, 'r> {
    vm: &'v Vm<'r>,
    executable: &'e Executable,
    globals: Namespace<'e, 'r>,
}

#[inline]
fn pop<'r>(stack: &mut Vec<Slot<'r>>) -> Result<Slot<'r>, ExecError> {
    stack.pop().ok_or(ExecError::InvalidBytecode {
        reason: "stack underflow",
    })
}

fn pop_n<'r>(stack: &mut Vec<Slot<'r>>, n: usize) -> Result<Vec<Slot<'r>>, ExecError> {
    match stack.len().checked_sub(n) {
        Some(at) => Ok(stack.split_off(at)),
        None => Err(ExecError::InvalidBytecode {
            reason: "stack underflow",
        }),
    }
}

impl<'v, 'e, 'r> Frame<'v, 'e, 'r> {
    fn name(&self, idx: u32) -> Result<&'e str, ExecError> {
        let executable: &'e Executable = self.executable;
        match executable.names.get(idx as usize) {
            Some(name) => Ok(name),
            None => Err(ExecError::InvalidBytecode {
                reason: "name index out of range",
            }),
        }
    }

    fn function(&self, idx: u32) -> Result<&'e CodeObject, ExecError> {
        let executable: &'e Executable = self.executable;
        executable
            .functions
            .get(idx as usize)
            .ok_or(ExecError::InvalidBytecode {
                reason: "function index out of range",
            })
    }

    fn constant(&self, idx: u32) -> Result<Value, ExecError> {
        match self.executable.consts.get(idx as usize) {
            Some(Const::Int(v)) => Ok(Value::Int(*v)),
            Some(Const::Float(v)) => Ok(Value::Float(*v)),
            Some(Const::Str(s)) => Ok(Value::Str(s.clone())),
            None => Err(ExecError::InvalidBytecode {
                reason: "constant index out of range",
            }),
        }
    }

    fn lookup(&self, locals: Option<&Namespace<'e, 'r>>, name: &str) -> Result<Slot<'r>, ExecError> {
        locals
            .and_then(|locals| locals.get(name))
            .or_else(|| self.globals.get(name))
            .cloned()
            .ok_or_else(|| ExecError::UnboundName {
                name: String::from(name),
            })
    }

    fn import(&mut self, module: &'e str) -> Result<(), ExecError> {
        if !self.vm.registry.contains_module(module) {
            return Err(ExecError::ModuleNotFound {
                module: String::from(module),
            });
        }
        if let Some(root) = module_segments(module).next() {
            self.globals
                .entry(root)
                .or_insert_with(|| Slot::Module(String::from(root)));
        }
        Ok(())
    }

    fn attribute(&self, target: Slot<'r>, attr: &str) -> Result<Slot<'r>, ExecError> {
        let registry = self.vm.registry;
        if let Slot::Module(module) = &target {
            let path = format!("{module}::{attr}");
            if let Some(meta) = registry.get_with_type_path(&path) {
                return Ok(Slot::Type(meta));
            }
            if registry.contains_module(&path) {
                return Ok(Slot::Module(path));
            }
        }
        Err(ExecError::NoAttribute {
            target: target.describe(),
            attr: String::from(attr),
        })
    }

    fn call(
        &mut self,
        callee: Slot<'r>,
        mut items: Vec<Slot<'r>>,
        args: usize,
        depth: usize,
    ) -> Result<Slot<'r>, ExecError> {
        match callee {
            Slot::Function(idx) => {
                let function = self.function(idx)?;
                if !items.is_empty() {
                    return Err(ExecError::FunctionArguments {
                        function: function.name.clone(),
                    });
                }
                let next = depth + 1;
                if next > self.vm.config.max_call_depth {
                    return Err(ExecError::CallDepth {
                        limit: self.vm.config.max_call_depth,
                    });
                }
                let mut locals = HashMap::default();
                self.run(function, Some(&mut locals), next)?
                    .ok_or(ExecError::InvalidBytecode {
                        reason: "function ended without a return",
                    })
            }
            Slot::Type(meta) => {
                let Some(construct) = meta.get_trait::<TypeTraitConstruct>() else {
                    return Err(ExecError::CannotConstruct {
                        type_path: meta.type_path(),
                    });
                };

                let pairs = items.split_off(args.min(items.len()));
                let mut arguments = Arguments::new();
                for item in items {
                    arguments.positional.push(item.into_value()?);
                }
                let mut pairs = pairs.into_iter();
                while let (Some(name), Some(value)) = (pairs.next(), pairs.next()) {
                    let Slot::Value(Value::Str(name)) = name else {
                        return Err(ExecError::InvalidBytecode {
                            reason: "keyword name is not a string",
                        });
                    };
                    arguments.keywords.push((name, value.into_value()?));
                }

                Ok(Slot::Value(Value::Object(construct.construct(arguments)?)))
            }
            other => Err(ExecError::NotCallable {
                found: other.describe(),
            }),
        }
    }

    fn allocate(target: Slot<'r>) -> Result<Slot<'r>, ExecError> {
        let Slot::Type(meta) = target else {
            return Err(ExecError::NotAType {
                found: target.describe(),
            });
        };
        match meta.get_trait::<TypeTraitAllocate>() {
            Some(allocate) => Ok(Slot::Value(Value::Object(allocate.allocate()))),
            None => Err(ExecError::CannotAllocate {
                type_path: meta.type_path(),
            }),
        }
    }

    fn set_attributes(
        &mut self,
        locals: Option<&mut Namespace<'e, 'r>>,
        target: &'e str,
        value: Value,
    ) -> Result<(), ExecError> {
        let attributes = match value {
            Value::Map(attributes) => attributes,
            other => {
                return Err(ExecError::SetAttributes {
                    target: String::from(target),
                    reason: format!("expected a map, found {}", other.category()),
                });
            }
        };

        let slot = match locals.and_then(|locals| locals.get_mut(target)) {
            Some(slot) => slot,
            None => self
                .globals
                .get_mut(target)
                .ok_or_else(|| ExecError::UnboundName {
                    name: String::from(target),
                })?,
        };
        match slot {
            Slot::Value(Value::Object(object)) => Ok(object.set_attributes(attributes)?),
            other => Err(ExecError::SetAttributes {
                target: String::from(target),
                reason: format!("{} is not an object", other.describe()),
            }),
        }
    }

    /// Runs `code` until it returns or runs out of instructions.
    ///
    /// `locals` is `None` for module-level code, whose assignments go to the
    /// globals.
    fn run(
        &mut self,
        code: &'e CodeObject,
        mut locals: Option<&mut Namespace<'e, 'r>>,
        depth: usize,
    ) -> Result<Option<Slot<'r>>, ExecError> {
        let mut stack: Vec<Slot<'r>> = Vec::new();

        for instruction in &code.instructions {
            match *instruction {
                Instruction::Import { module } => {
                    let module = self.name(module)?;
                    self.import(module)?;
                }
                Instruction::DefineFunction { function } => {
                    let name = self.function(function)?.name.as_str();
                    self.globals.insert(name, Slot::Function(function));
                }
                Instruction::LoadConst(idx) => {
                    stack.push(Slot::Value(self.constant(idx)?));
                }
                Instruction::LoadBuiltin(builtin) => {
                    stack.push(Slot::Value(builtin.to_value()));
                }
                Instruction::LoadName(idx) => {
                    let name = self.name(idx)?;
                    stack.push(self.lookup(locals.as_deref(), name)?);
                }
                Instruction::StoreName(idx) => {
                    let name = self.name(idx)?;
                    let slot = pop(&mut stack)?;
                    match locals.as_deref_mut() {
                        Some(locals) => locals.insert(name, slot),
                        None => self.globals.insert(name, slot),
                    };
                }
                Instruction::LoadAttr(idx) => {
                    let attr = self.name(idx)?;
                    let target = pop(&mut stack)?;
                    stack.push(self.attribute(target, attr)?);
                }
                Instruction::BuildSet(n) => {
                    let set = pop_n(&mut stack, n as usize)?
                        .into_iter()
                        .map(Slot::into_value)
                        .collect::<Result<ValueSet, _>>()?;
                    stack.push(Slot::Value(Value::Set(set)));
                }
                Instruction::BuildMap(n) => {
                    let mut items = pop_n(&mut stack, 2 * n as usize)?.into_iter();
                    let mut map = ValueMap::default();
                    while let (Some(key), Some(value)) = (items.next(), items.next()) {
                        map.insert(key.into_value()?, value.into_value()?);
                    }
                    stack.push(Slot::Value(Value::Map(map)));
                }
                Instruction::Call { args, keywords } => {
                    let args = args as usize;
                    let items = pop_n(&mut stack, args + 2 * keywords as usize)?;
                    let callee = pop(&mut stack)?;
                    let result = self.call(callee, items, args, depth)?;
                    stack.push(result);
                }
                Instruction::Allocate => {
                    let target = pop(&mut stack)?;
                    stack.push(Self::allocate(target)?);
                }
                Instruction::SetAttributes(idx) => {
                    let target = self.name(idx)?;
                    let value = pop(&mut stack)?.into_value()?;
                    self.set_attributes(locals.as_deref_mut(), target, value)?;
                }
                Instruction::Return => return pop(&mut stack).map(Some),
            }
        }

        Ok(None)
    }
}
