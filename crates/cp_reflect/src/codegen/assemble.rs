use crate::codegen::{EncodeConfig, EncodeError, Fragment, OUTPUT_NAME, ProgramUnit, Session, Stmt};
use crate::value::Value;

impl Session {
    /// Consumes the session and builds the complete program around the
    /// top-level fragment.
    ///
    /// Order: sorted imports, definitions in creation order, the fragment
    /// statements, then `OUTPUT_NAME = <fragment expression>`.
    pub fn assemble(self, fragment: Fragment) -> ProgramUnit {
        let Fragment { statements, expr } = fragment;
        ProgramUnit {
            imports: self.imports.into_iter().collect(),
            definitions: self.definitions,
            preamble: statements,
            binding: Stmt::assign(OUTPUT_NAME, expr),
        }
    }
}

/// Encodes `value` in a fresh [`Session`] and assembles the program.
///
/// The same value always produces the same program.
pub fn generate_program(value: &Value, config: &EncodeConfig) -> Result<ProgramUnit, EncodeError> {
    let mut session = Session::with_config(config.clone());
    let fragment = session.encode(value)?;
    let program = session.assemble(fragment);

    log::debug!(
        "generated program with {} imports and {} definitions",
        program.imports.len(),
        program.definitions.len(),
    );
    Ok(program)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::generate_program;
    use crate::codegen::{EncodeConfig, Expr, OUTPUT_NAME, ProgramUnit, Stmt};
    use crate::derive::Object;
    use crate::value::{Value, ValueMap};

    #[derive(Object, Default, Clone, PartialEq, Debug)]
    #[object(type_path = "farm::animals::Cow")]
    struct Cow {
        name: String,
        weight: f64,
    }

    #[derive(Object, Default, Clone, PartialEq, Debug)]
    #[object(type_path = "farm::Barn")]
    struct Barn {
        cow: Option<Cow>,
        open: bool,
    }

    fn sample() -> Value {
        let barn = Barn {
            cow: Some(Cow {
                name: String::from("Bessie"),
                weight: 612.5,
            }),
            open: true,
        };
        let map: ValueMap = [
            (Value::from("barn"), Value::object(barn)),
            (Value::from("count"), Value::from(1)),
        ]
        .into_iter()
        .collect();
        Value::Map(map)
    }

    #[test]
    fn layout_follows_creation_order() {
        let program = generate_program(&sample(), &EncodeConfig::default()).unwrap();

        assert_eq!(program.imports, ["farm", "farm::animals"]);
        // The cow is wrapped before the barn that contains it.
        assert_eq!(program.definitions.len(), 2);
        assert!(program.definitions[1].body.iter().any(|stmt| matches!(
            stmt,
            Stmt::SetAttributes { value: Expr::Map(entries), .. }
                if entries.iter().any(|(_, value)| *value == Expr::invoke(program.definitions[0].name.clone()))
        )));
        assert!(matches!(&program.binding, Stmt::Assign { target, .. } if target == OUTPUT_NAME));
    }

    #[test]
    fn generation_is_deterministic() {
        let first = generate_program(&sample(), &EncodeConfig::default()).unwrap();
        let second = generate_program(&sample(), &EncodeConfig::default()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn program_survives_text_formats() {
        let program = generate_program(&sample(), &EncodeConfig::default()).unwrap();

        let json = serde_json::to_string(&program).unwrap();
        assert_eq!(serde_json::from_str::<ProgramUnit>(&json).unwrap(), program);

        let ron = ron::to_string(&program).unwrap();
        assert_eq!(ron::from_str::<ProgramUnit>(&ron).unwrap(), program);
    }
}
