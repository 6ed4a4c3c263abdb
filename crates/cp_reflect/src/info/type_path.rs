// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// Provide a stable alternative to [`core::any::type_name`] that survives
/// compiler upgrades: a program generated today must still find the type
/// when it is executed by a later build.
///
/// We guarantee that these names do not have the prefix `::`.
/// Users should also ensure this when manually implementing it.
///
/// # Implementation
///
/// ## derive macro
///
/// ```
/// use cp_reflect::derive::TypePath;
///
/// // The path follows the definition: `<module_path!()>::Located`.
/// #[derive(TypePath)]
/// struct Located;
///
/// // This type path will never change, even if the definition is moved.
/// #[derive(TypePath)]
/// #[object(type_path = "my_crate::shapes::Pinned")]
/// struct Pinned;
/// ```
///
/// ## Manually
///
/// ```
/// use cp_reflect::info::TypePath;
///
/// struct Foo;
///
/// impl TypePath for Foo {
///     fn type_path() -> &'static str { "my_crate::foo::Foo" }
///     fn type_name() -> &'static str { "Foo" }
///     fn module_path() -> Option<&'static str> { Some("my_crate::foo") }
/// }
/// ```
pub trait TypePath: 'static {
    /// Returns the fully qualified path of the type.
    ///
    /// This is the complete unique identifier of a type,
    /// and should **not** duplicated in different types.
    fn type_path() -> &'static str;

    /// Returns the type name without module path.
    ///
    /// `type_path` must equal `module_path + "::" + type_name`
    /// whenever a module path exists.
    fn type_name() -> &'static str;

    /// Optional module path where the type is defined.
    ///
    /// Types without a module path cannot be referenced by generated programs.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// Provide dynamic dispatch for types that implement [`TypePath`].
///
/// Auto impl for all types that implemented [`TypePath`].
pub trait DynamicTypePath {
    /// See [`TypePath::type_path`].
    fn reflect_type_path(&self) -> &'static str;

    /// See [`TypePath::type_name`].
    fn reflect_type_name(&self) -> &'static str;

    /// See [`TypePath::module_path`].
    fn reflect_module_path(&self) -> Option<&'static str>;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        Self::type_name()
    }

    #[inline]
    fn reflect_module_path(&self) -> Option<&'static str> {
        Self::module_path()
    }
}

// -----------------------------------------------------------------------------
// TypePathTable

/// Lightweight vtable providing dynamic access to [`TypePath`] APIs.
///
/// # Examples
///
/// ```
/// use cp_reflect::info::{TypePath, TypePathTable};
///
/// struct Foo;
///
/// impl TypePath for Foo {
///     fn type_path() -> &'static str { "my_crate::foo::Foo" }
///     fn type_name() -> &'static str { "Foo" }
///     fn module_path() -> Option<&'static str> { Some("my_crate::foo") }
/// }
///
/// let x = TypePathTable::of::<Foo>();
/// assert_eq!(x.path(), "my_crate::foo::Foo");
/// assert_eq!(x.name(), "Foo");
/// assert_eq!(x.module_path(), Some("my_crate::foo"));
/// ```
#[derive(Clone, Copy)]
pub struct TypePathTable {
    type_path: fn() -> &'static str,
    type_name: fn() -> &'static str,
    module_path: fn() -> Option<&'static str>,
}

impl TypePathTable {
    /// Creates a new table from a type.
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_path: T::type_path,
            type_name: T::type_name,
            module_path: T::module_path,
        }
    }

    /// See [`TypePath::type_path`]
    #[inline(always)]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    /// See [`TypePath::type_name`]
    #[inline(always)]
    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }

    /// See [`TypePath::module_path`]
    #[inline(always)]
    pub fn module_path(&self) -> Option<&'static str> {
        (self.module_path)()
    }
}

impl core::fmt::Debug for TypePathTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

/// Splits a `::` separated module path into its segments.
///
/// ```
/// let segments: Vec<_> = cp_reflect::info::module_segments("a::b::c").collect();
/// assert_eq!(segments, ["a", "b", "c"]);
/// ```
#[inline]
pub fn module_segments(module_path: &str) -> impl Iterator<Item = &str> {
    module_path.split("::").filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{TypePath, TypePathTable};

    struct Nested;

    impl TypePath for Nested {
        fn type_path() -> &'static str {
            "outer::inner::Nested"
        }
        fn type_name() -> &'static str {
            "Nested"
        }
        fn module_path() -> Option<&'static str> {
            Some("outer::inner")
        }
    }

    #[test]
    fn table_reads_through() {
        let table = TypePathTable::of::<Nested>();
        assert!(table.path() == "outer::inner::Nested");
        assert!(table.name() == "Nested");
        assert!(table.module_path() == Some("outer::inner"));
    }
}
