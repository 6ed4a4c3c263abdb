use alloc::string::String;
use alloc::vec::Vec;

use crate::object::ObjectError;
use crate::value::{Value, ValueMap};

// -----------------------------------------------------------------------------
// Construction

/// How the fallback encoder rebuilds an object without a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construction {
    /// Create a bare instance, then bulk-assign the attribute mapping.
    ///
    /// Requires the `TypeTraitAllocate` type trait at execution time.
    Allocate,
    /// Call the type with the attributes as keyword arguments.
    ///
    /// Requires the `TypeTraitConstruct` type trait at execution time.
    Construct,
    /// The object cannot be rebuilt from its attributes.
    Unsupported,
}

// -----------------------------------------------------------------------------
// Construct

/// Builds a value of a type from call arguments.
///
/// This is what runs when a generated program calls a type, e.g.
/// `shapes::Point(x = 1, y = 2)`.
pub trait Construct: Sized {
    fn construct(arguments: Arguments) -> Result<Self, ObjectError>;
}

// -----------------------------------------------------------------------------
// Arguments

/// Positional and keyword arguments of a call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    pub positional: Vec<Value>,
    pub keywords: Vec<(String, Value)>,
}

impl Arguments {
    #[inline]
    pub const fn new() -> Self {
        Self {
            positional: Vec::new(),
            keywords: Vec::new(),
        }
    }

    /// Adds a positional argument.
    #[inline]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds a keyword argument.
    #[inline]
    pub fn keyword(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.push((name.into(), value.into()));
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    /// Binds the arguments to `fields`, returning an attribute mapping.
    ///
    /// Positional arguments bind fields in declaration order, keywords bind by
    /// name. Missing fields are left out of the mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use cp_reflect::object::Arguments;
    /// use cp_reflect::value::Value;
    ///
    /// let bound = Arguments::new()
    ///     .arg(1)
    ///     .keyword("y", 2)
    ///     .bind("shapes::Point", &["x", "y"])
    ///     .unwrap();
    ///
    /// assert_eq!(bound.get(&Value::from("x")), Some(&Value::Int(1)));
    /// assert_eq!(bound.get(&Value::from("y")), Some(&Value::Int(2)));
    /// ```
    pub fn bind(
        self,
        type_path: &'static str,
        fields: &[&'static str],
    ) -> Result<ValueMap, ObjectError> {
        let Self {
            positional,
            keywords,
        } = self;

        if positional.len() > fields.len() {
            return Err(ObjectError::TooManyArguments {
                type_path,
                expected: fields.len(),
                found: positional.len(),
            });
        }

        let mut bound = ValueMap::with_capacity_and_hasher(fields.len(), Default::default());
        for (field, value) in fields.iter().zip(positional) {
            bound.insert(Value::from(*field), value);
        }

        for (name, value) in keywords {
            let Some(field) = fields.iter().find(|field| **field == name) else {
                return Err(ObjectError::UnknownAttribute {
                    type_path,
                    attribute: name,
                });
            };
            let key = Value::from(*field);
            if bound.contains_key(&key) {
                return Err(ObjectError::DuplicateArgument {
                    type_path,
                    attribute: name,
                });
            }
            bound.insert(key, value);
        }

        Ok(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::Arguments;
    use crate::object::ObjectError;

    const FIELDS: &[&str] = &["a", "b"];

    #[test]
    fn rejects_extra_positionals() {
        let err = Arguments::new()
            .arg(1)
            .arg(2)
            .arg(3)
            .bind("t::T", FIELDS)
            .unwrap_err();
        assert!(matches!(
            err,
            ObjectError::TooManyArguments {
                expected: 2,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn rejects_duplicates_and_unknown_names() {
        let err = Arguments::new()
            .arg(1)
            .keyword("a", 2)
            .bind("t::T", FIELDS)
            .unwrap_err();
        assert!(matches!(err, ObjectError::DuplicateArgument { .. }));

        let err = Arguments::new()
            .keyword("c", 2)
            .bind("t::T", FIELDS)
            .unwrap_err();
        assert!(matches!(err, ObjectError::UnknownAttribute { .. }));
    }

    #[test]
    fn partial_binding_leaves_gaps() {
        let bound = Arguments::new().keyword("b", 5).bind("t::T", FIELDS).unwrap();
        assert_eq!(bound.len(), 1);
    }
}
