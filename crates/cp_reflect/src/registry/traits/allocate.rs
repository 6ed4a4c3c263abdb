use alloc::boxed::Box;

use crate::Object;
use crate::info::TypePath;
use crate::registry::FromType;

/// A container providing bare instances of registered types.
///
/// A generated program allocates a bare instance with this type trait, then
/// fills it with a bulk attribute store ([`Object::set_attributes`]).
///
/// Registered by `#[derive(Object)]` unless `#[object(construct)]` is used,
/// which requires the type to implement [`Default`].
///
/// # Examples
///
/// ```
/// use cp_reflect::derive::Object;
/// use cp_reflect::registry::{TypeRegistry, TypeTraitAllocate};
///
/// #[derive(Object, Default, Clone, PartialEq, Debug)]
/// #[object(type_path = "demo::Counter")]
/// struct Counter {
///     hits: u32,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Counter>();
///
/// let allocate = registry
///     .get_with_type_path("demo::Counter").unwrap()
///     .get_trait::<TypeTraitAllocate>().unwrap();
///
/// let bare = allocate.allocate();
/// assert_eq!(bare.take::<Counter>().unwrap(), Counter::default());
/// ```
#[derive(Clone)]
pub struct TypeTraitAllocate {
    func: fn() -> Box<dyn Object>,
}

impl TypeTraitAllocate {
    /// Creates a bare instance from `T`'s [`Default`].
    #[inline(always)]
    pub fn allocate(&self) -> Box<dyn Object> {
        (self.func)()
    }
}

impl<T: Default + TypePath + Object> FromType<T> for TypeTraitAllocate {
    fn from_type() -> Self {
        Self {
            func: || Box::<T>::default(),
        }
    }
}
