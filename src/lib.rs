//! Serialize values as small programs that rebuild them when executed.
//!
//! A [`Value`] graph is encoded into a program unit: imports of the modules
//! holding the types it uses, zero-argument functions rebuilding the parts
//! that need several statements, and a final binding of the result to
//! [`OUTPUT_NAME`](reflect::codegen::OUTPUT_NAME). The unit is compiled to
//! bytecode and stored in a versioned container. Deserializing runs the
//! bytecode against a [`TypeRegistry`](reflect::registry::TypeRegistry).
//!
//! ```
//! use cp_core::reflect::derive::Object;
//! use cp_core::reflect::value::{Value, ValueMap};
//!
//! #[derive(Object, Default, Clone, PartialEq, Debug)]
//! #[object(type_path = "farm::Cow", auto_register)]
//! struct Cow {
//!     name: String,
//!     age: i64,
//! }
//!
//! let herd: ValueMap = [(
//!     Value::from("daisy"),
//!     Value::object(Cow { name: "Daisy".into(), age: 4 }),
//! )]
//! .into_iter()
//! .collect();
//! let value = Value::from(herd);
//!
//! println!("{}", cp_core::generate_code(&value).unwrap());
//!
//! let bytes = cp_core::serialize(&value).unwrap();
//! assert_eq!(cp_core::deserialize(&bytes).unwrap(), value);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod config;
mod error;
mod pickler;

pub use cp_reflect as reflect;
pub use cp_utils as utils;
pub use cp_vm as vm;

// -----------------------------------------------------------------------------
// Exports

use alloc::string::String;
use alloc::vec::Vec;
use std::io::{Read, Write};

use cp_reflect::codegen::ProgramUnit;
pub use cp_reflect::value::Value;

pub use config::Config;
pub use error::Error;
pub use pickler::{Pickler, global_registry};

/// Encodes `value` into a program unit with the default limits.
#[inline]
pub fn generate_program(value: &Value) -> Result<ProgramUnit, Error> {
    Pickler::global().generate_program(value)
}

/// Renders the program unit of `value` as text.
#[inline]
pub fn generate_code(value: &Value) -> Result<String, Error> {
    Pickler::global().generate_code(value)
}

/// Serializes `value` into container bytes.
#[inline]
pub fn serialize(value: &Value) -> Result<Vec<u8>, Error> {
    Pickler::global().serialize(value)
}

/// Rebuilds a value from container bytes, using the [`global_registry`].
#[inline]
pub fn deserialize(bytes: &[u8]) -> Result<Value, Error> {
    Pickler::global().deserialize(bytes)
}

/// Serializes `value` into `writer`.
#[inline]
pub fn dump(value: &Value, writer: impl Write) -> Result<(), Error> {
    Pickler::global().dump(value, writer)
}

/// Rebuilds a value read from `reader`, using the [`global_registry`].
#[inline]
pub fn load(reader: impl Read) -> Result<Value, Error> {
    Pickler::global().load(reader)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use cp_reflect::derive::Object;
    use cp_reflect::value::{Value, ValueMap, ValueSet};

    #[derive(Object, Default, Clone, PartialEq, Debug)]
    #[object(type_path = "garden::Plant", auto_register)]
    struct Plant {
        species: String,
        height: f64,
    }

    #[test]
    fn builtin_values() {
        let set: ValueSet = [Value::from(1), Value::from("x"), Value::from(false)]
            .into_iter()
            .collect();
        let map: ValueMap = [
            (Value::from("set"), Value::from(set)),
            (Value::from(2.5), Value::None),
        ]
        .into_iter()
        .collect();
        let value = Value::from(map);

        let bytes = crate::serialize(&value).unwrap();
        assert_eq!(crate::deserialize(&bytes).unwrap(), value);
        assert_eq!(
            crate::generate_code(&Value::from(2123)).unwrap(),
            "let retval = 2123;\n"
        );
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn global_registry_finds_marked_types() {
        let value = Value::object(Plant {
            species: String::from("fern"),
            height: 0.4,
        });

        let mut buffer = Vec::new();
        crate::dump(&value, &mut buffer).unwrap();
        assert_eq!(crate::load(buffer.as_slice()).unwrap(), value);
        assert!(crate::global_registry().read().contains_module("garden"));
    }
}
