use alloc::string::String;
use alloc::vec::Vec;

use cp_reflect::codegen::Builtin;
use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// Const

/// A literal in the constant pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Const {
    Int(i64),
    Float(f64),
    Str(String),
}

// -----------------------------------------------------------------------------
// Instruction

/// One step of the stack machine.
///
/// `u32` operands index [`Executable::names`], [`Executable::consts`] or
/// [`Executable::functions`], as documented per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Checks the module `names[module]` is known and binds its root segment.
    Import { module: u32 },
    /// Binds `functions[function]` under its name.
    DefineFunction { function: u32 },
    LoadConst(u32),
    LoadBuiltin(Builtin),
    LoadName(u32),
    StoreName(u32),
    /// Replaces the top of the stack with its attribute `names[attr]`.
    LoadAttr(u32),
    /// Pops `n` values into a set.
    BuildSet(u32),
    /// Pops `n` key-value pairs into a map.
    BuildMap(u32),
    /// Stack: callee, `args` values, then `keywords` pairs of name and value.
    Call { args: u32, keywords: u32 },
    /// Replaces the type on top of the stack with a bare instance.
    Allocate,
    /// Pops a map and assigns it as the attributes of the object bound to
    /// `names[target]`.
    SetAttributes(u32),
    Return,
}

// -----------------------------------------------------------------------------
// CodeObject / Executable

/// A named instruction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeObject {
    pub name: String,
    pub instructions: Vec<Instruction>,
}

/// A compiled program, ready to be executed or stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Executable {
    pub names: Vec<String>,
    pub consts: Vec<Const>,
    pub functions: Vec<CodeObject>,
    pub main: CodeObject,
}

impl Executable {
    /// Total number of instructions, functions included.
    pub fn instruction_count(&self) -> usize {
        self.main.instructions.len()
            + self
                .functions
                .iter()
                .map(|function| function.instructions.len())
                .sum::<usize>()
    }
}
