use alloc::string::String;
use alloc::vec::Vec;

use cp_reflect::codegen::{Expr, FunctionDef, ProgramUnit, Stmt};
use cp_utils::hash::HashMap;

use crate::bytecode::{CodeObject, Const, Executable, Instruction};

const MAIN_NAME: &str = "<main>";

/// Floats are keyed by their bits so that the pool can dedupe them.
#[derive(PartialEq, Eq, Hash)]
enum ConstKey {
    Int(i64),
    Float(u64),
    Str(String),
}

#[derive(Default)]
struct Lowerer {
    names: Vec<String>,
    name_index: HashMap<String, u32>,
    consts: Vec<Const>,
    const_index: HashMap<ConstKey, u32>,
    instructions: Vec<Instruction>,
}

/// Pool sizes are bounded by the program text, far below `u32::MAX`.
#[inline]
fn index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl Lowerer {
    fn name(&mut self, name: &str) -> u32 {
        if let Some(&idx) = self.name_index.get(name) {
            return idx;
        }
        let idx = index(self.names.len());
        self.names.push(String::from(name));
        self.name_index.insert(String::from(name), idx);
        idx
    }

    fn constant(&mut self, key: ConstKey) -> u32 {
        if let Some(&idx) = self.const_index.get(&key) {
            return idx;
        }
        let idx = index(self.consts.len());
        self.consts.push(match &key {
            ConstKey::Int(v) => Const::Int(*v),
            ConstKey::Float(bits) => Const::Float(f64::from_bits(*bits)),
            ConstKey::Str(s) => Const::Str(s.clone()),
        });
        self.const_index.insert(key, idx);
        idx
    }

    #[inline]
    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    fn load_const(&mut self, key: ConstKey) {
        let idx = self.constant(key);
        self.emit(Instruction::LoadConst(idx));
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Int(v) => self.load_const(ConstKey::Int(*v)),
            Expr::Float(v) => self.load_const(ConstKey::Float(v.to_bits())),
            Expr::Str(s) => self.load_const(ConstKey::Str(s.clone())),
            Expr::Builtin(builtin) => self.emit(Instruction::LoadBuiltin(*builtin)),
            Expr::Name(name) => {
                let idx = self.name(name);
                self.emit(Instruction::LoadName(idx));
            }
            Expr::Attribute { value, attr } => {
                self.expr(value);
                let idx = self.name(attr);
                self.emit(Instruction::LoadAttr(idx));
            }
            Expr::Set(items) => {
                items.iter().for_each(|item| self.expr(item));
                self.emit(Instruction::BuildSet(index(items.len())));
            }
            Expr::Map(entries) => {
                for (key, value) in entries {
                    self.expr(key);
                    self.expr(value);
                }
                self.emit(Instruction::BuildMap(index(entries.len())));
            }
            Expr::Call {
                func,
                args,
                keywords,
            } => {
                self.expr(func);
                args.iter().for_each(|arg| self.expr(arg));
                for (keyword, value) in keywords {
                    self.load_const(ConstKey::Str(keyword.clone()));
                    self.expr(value);
                }
                self.emit(Instruction::Call {
                    args: index(args.len()),
                    keywords: index(keywords.len()),
                });
            }
            Expr::Allocate(ty) => {
                self.expr(ty);
                self.emit(Instruction::Allocate);
            }
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign { target, value } => {
                self.expr(value);
                let idx = self.name(target);
                self.emit(Instruction::StoreName(idx));
            }
            Stmt::SetAttributes { target, value } => {
                self.expr(value);
                let idx = self.name(target);
                self.emit(Instruction::SetAttributes(idx));
            }
            Stmt::Return(value) => {
                self.expr(value);
                self.emit(Instruction::Return);
            }
        }
    }

    fn code_object<'s>(
        &mut self,
        name: &str,
        stmts: impl IntoIterator<Item = &'s Stmt>,
    ) -> CodeObject {
        stmts.into_iter().for_each(|stmt| self.stmt(stmt));
        CodeObject {
            name: String::from(name),
            instructions: core::mem::take(&mut self.instructions),
        }
    }

    #[inline]
    fn function(&mut self, def: &FunctionDef) -> CodeObject {
        self.code_object(&def.name, &def.body)
    }
}

/// Lowers a program that passed the scope checks.
pub(super) fn lower(program: &ProgramUnit) -> Executable {
    let mut lowerer = Lowerer::default();

    let functions: Vec<CodeObject> = program
        .definitions
        .iter()
        .map(|def| lowerer.function(def))
        .collect();

    for import in &program.imports {
        let module = lowerer.name(import);
        lowerer.emit(Instruction::Import { module });
    }
    for function in 0..functions.len() {
        lowerer.emit(Instruction::DefineFunction {
            function: index(function),
        });
    }
    let main = lowerer.code_object(
        MAIN_NAME,
        program.preamble.iter().chain([&program.binding]),
    );

    Executable {
        names: lowerer.names,
        consts: lowerer.consts,
        functions,
        main,
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use cp_reflect::codegen::{Expr, FunctionDef, OUTPUT_NAME, ProgramUnit, Stmt};

    use super::lower;
    use crate::bytecode::{Const, Instruction};

    #[test]
    fn dedupes_pools() {
        let unit = ProgramUnit {
            imports: Vec::new(),
            definitions: Vec::new(),
            preamble: Vec::new(),
            binding: Stmt::assign(
                OUTPUT_NAME,
                Expr::Set(vec![Expr::Float(1.5), Expr::Float(1.5), Expr::Str(String::from("k"))]),
            ),
        };
        let executable = lower(&unit);

        assert_eq!(executable.consts, [Const::Float(1.5), Const::Str(String::from("k"))]);
        assert_eq!(
            executable.main.instructions,
            [
                Instruction::LoadConst(0),
                Instruction::LoadConst(0),
                Instruction::LoadConst(1),
                Instruction::BuildSet(3),
                Instruction::StoreName(0),
            ]
        );
        assert_eq!(executable.names, [OUTPUT_NAME]);
    }

    #[test]
    fn orders_main() {
        let unit = ProgramUnit {
            imports: vec![String::from("zoo")],
            definitions: vec![FunctionDef {
                name: String::from("func_1"),
                body: vec![Stmt::Return(Expr::name("zoo").attribute("Owl").call(
                    vec![Expr::Int(3)],
                    vec![(String::from("wings"), Expr::Int(2))],
                ))],
            }],
            preamble: Vec::new(),
            binding: Stmt::assign(OUTPUT_NAME, Expr::invoke("func_1")),
        };
        let executable = lower(&unit);

        assert_eq!(executable.functions.len(), 1);
        assert_eq!(
            executable.functions[0].instructions.last(),
            Some(&Instruction::Return)
        );
        assert!(matches!(
            executable.functions[0].instructions[..],
            [
                Instruction::LoadName(_),
                Instruction::LoadAttr(_),
                Instruction::LoadConst(_),
                Instruction::LoadConst(_),
                Instruction::LoadConst(_),
                Instruction::Call { args: 1, keywords: 1 },
                Instruction::Return,
            ]
        ));
        assert!(matches!(
            executable.main.instructions[..],
            [
                Instruction::Import { .. },
                Instruction::DefineFunction { function: 0 },
                Instruction::LoadName(_),
                Instruction::Call { args: 0, keywords: 0 },
                Instruction::StoreName(_),
            ]
        ));
    }
}
