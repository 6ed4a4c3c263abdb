use alloc::format;
use alloc::string::String;

use cp_reflect::codegen::{Expr, FunctionDef, OUTPUT_NAME, ProgramUnit, Stmt};
use cp_reflect::info::module_segments;
use cp_utils::hash::HashSet;

use crate::error::CompileError;

const MODULE_SCOPE: &str = "module scope";

/// Names visible in one scope.
struct Scope<'a> {
    /// Import roots and definition names.
    globals: &'a HashSet<&'a str>,
    /// Every name assigned at module level, for function bodies.
    module_names: Option<&'a HashSet<&'a str>>,
    /// Names assigned so far in this scope.
    assigned: HashSet<&'a str>,
    label: String,
}

impl<'a> Scope<'a> {
    fn contains(&self, name: &str) -> bool {
        self.assigned.contains(name)
            || self.globals.contains(name)
            || self.module_names.is_some_and(|names| names.contains(name))
    }

    fn require(&self, name: &str) -> Result<(), CompileError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(CompileError::UnboundName {
                name: String::from(name),
                scope: self.label.clone(),
            })
        }
    }

    fn check_expr(&self, expr: &Expr) -> Result<(), CompileError> {
        match expr {
            Expr::Int(_) | Expr::Float(_) | Expr::Str(_) | Expr::Builtin(_) => Ok(()),
            Expr::Name(name) => self.require(name),
            Expr::Attribute { value, .. } => self.check_expr(value),
            Expr::Set(items) => items.iter().try_for_each(|item| self.check_expr(item)),
            Expr::Map(entries) => entries.iter().try_for_each(|(key, value)| {
                self.check_expr(key)?;
                self.check_expr(value)
            }),
            Expr::Call {
                func,
                args,
                keywords,
            } => {
                self.check_expr(func)?;
                args.iter().try_for_each(|arg| self.check_expr(arg))?;
                keywords
                    .iter()
                    .try_for_each(|(_, value)| self.check_expr(value))
            }
            Expr::Allocate(ty) => self.check_expr(ty),
        }
    }

    fn check_stmt(&mut self, stmt: &'a Stmt, in_function: bool) -> Result<(), CompileError> {
        match stmt {
            Stmt::Assign { target, value } => {
                self.check_expr(value)?;
                self.assigned.insert(target.as_str());
                Ok(())
            }
            Stmt::SetAttributes { target, value } => {
                self.check_expr(value)?;
                self.require(target)
            }
            Stmt::Return(value) if in_function => self.check_expr(value),
            Stmt::Return(_) => Err(CompileError::ReturnOutsideFunction),
        }
    }
}

fn assigned_names<'a>(stmts: impl Iterator<Item = &'a Stmt>) -> HashSet<&'a str> {
    stmts
        .filter_map(|stmt| match stmt {
            Stmt::Assign { target, .. } => Some(target.as_str()),
            _ => None,
        })
        .collect()
}

fn check_function<'a>(
    def: &'a FunctionDef,
    globals: &'a HashSet<&'a str>,
    module_names: &'a HashSet<&'a str>,
) -> Result<(), CompileError> {
    if !def.body.last().is_some_and(Stmt::is_return) {
        return Err(CompileError::MissingReturn {
            function: def.name.clone(),
        });
    }

    let mut scope = Scope {
        globals,
        module_names: Some(module_names),
        assigned: HashSet::default(),
        label: format!("function `{}`", def.name),
    };
    def.body
        .iter()
        .try_for_each(|stmt| scope.check_stmt(stmt, true))
}

/// Checks that `program` is well formed.
pub(super) fn check(program: &ProgramUnit) -> Result<(), CompileError> {
    let mut globals: HashSet<&str> = HashSet::default();

    for import in &program.imports {
        if import.split("::").any(str::is_empty) {
            return Err(CompileError::EmptyModulePath {
                module: import.clone(),
            });
        }
        if let Some(root) = module_segments(import).next() {
            globals.insert(root);
        }
    }

    for def in &program.definitions {
        if def.name == OUTPUT_NAME || !globals.insert(def.name.as_str()) {
            return Err(CompileError::DuplicateDefinition {
                name: def.name.clone(),
            });
        }
    }

    let module_stmts = || program.preamble.iter().chain([&program.binding]);
    let module_names = assigned_names(module_stmts());

    for def in &program.definitions {
        check_function(def, &globals, &module_names)?;
    }

    let mut scope = Scope {
        globals: &globals,
        module_names: None,
        assigned: HashSet::default(),
        label: String::from(MODULE_SCOPE),
    };
    module_stmts().try_for_each(|stmt| scope.check_stmt(stmt, false))
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use cp_reflect::codegen::{Expr, FunctionDef, OUTPUT_NAME, ProgramUnit, Stmt};

    use super::check;
    use crate::error::CompileError;

    fn program(definitions: Vec<FunctionDef>, binding: Expr) -> ProgramUnit {
        ProgramUnit {
            imports: vec![String::from("zoo::birds")],
            definitions,
            preamble: Vec::new(),
            binding: Stmt::assign(OUTPUT_NAME, binding),
        }
    }

    fn def(name: &str, body: Vec<Stmt>) -> FunctionDef {
        FunctionDef {
            name: String::from(name),
            body,
        }
    }

    #[test]
    fn accepts_generated_shape() {
        let body = vec![
            Stmt::assign("obj", Expr::name("zoo").attribute("birds").attribute("Owl").allocate()),
            Stmt::set_attributes("obj", Expr::Map(Vec::new())),
            Stmt::Return(Expr::name("obj")),
        ];
        let unit = program(vec![def("func_1", body)], Expr::invoke("func_1"));
        assert_eq!(check(&unit), Ok(()));
    }

    #[test]
    fn rejects_duplicates() {
        let ret = || vec![Stmt::Return(Expr::Int(1))];
        let unit = program(vec![def("f", ret()), def("f", ret())], Expr::Int(0));
        assert!(matches!(check(&unit), Err(CompileError::DuplicateDefinition { .. })));

        let unit = program(vec![def("zoo", ret())], Expr::Int(0));
        assert!(matches!(check(&unit), Err(CompileError::DuplicateDefinition { .. })));

        let unit = program(vec![def(OUTPUT_NAME, ret())], Expr::Int(0));
        assert!(matches!(check(&unit), Err(CompileError::DuplicateDefinition { .. })));
    }

    #[test]
    fn rejects_dangling_names() {
        let unit = program(Vec::new(), Expr::name("ghost"));
        assert_eq!(
            check(&unit),
            Err(CompileError::UnboundName {
                name: String::from("ghost"),
                scope: String::from("module scope"),
            })
        );

        // A local is only visible after its assignment.
        let body = vec![
            Stmt::set_attributes("late", Expr::Map(Vec::new())),
            Stmt::assign("late", Expr::Int(1)),
            Stmt::Return(Expr::name("late")),
        ];
        let unit = program(vec![def("f", body)], Expr::invoke("f"));
        assert!(matches!(check(&unit), Err(CompileError::UnboundName { .. })));
    }

    #[test]
    fn rejects_misplaced_returns() {
        let unit = program(vec![def("f", vec![Stmt::assign("x", Expr::Int(1))])], Expr::Int(0));
        assert_eq!(
            check(&unit),
            Err(CompileError::MissingReturn {
                function: String::from("f")
            })
        );

        let mut unit = program(Vec::new(), Expr::Int(0));
        unit.preamble.push(Stmt::Return(Expr::Int(1)));
        assert_eq!(check(&unit), Err(CompileError::ReturnOutsideFunction));
    }

    #[test]
    fn rejects_empty_segments() {
        let mut unit = program(Vec::new(), Expr::Int(0));
        unit.imports.push(String::from("zoo::::birds"));
        assert!(matches!(check(&unit), Err(CompileError::EmptyModulePath { .. })));
    }
}
