use crate::info::TypePath;

/// Trait used to generate [`TypeTrait`] for a type.
///
/// This is used by the `#[derive(Object)]` macro to generate an implementation
/// of [`TypeTrait`] to pass to [`TypeMeta::insert_trait`].
///
/// # Example
///
/// ```
/// # use cp_reflect::derive::Object;
/// # use cp_reflect::registry::{TypeMeta, TypeTraitAllocate, FromType};
/// #[derive(Object, Default, Clone)]
/// struct Empty;
///
/// let mut meta = TypeMeta::of::<Empty>();
/// meta.insert_trait::<TypeTraitAllocate>(FromType::<Empty>::from_type());
/// ```
///
/// [`TypeTrait`]: crate::registry::TypeTrait
/// [`TypeMeta::insert_trait`]: crate::registry::TypeMeta::insert_trait
pub trait FromType<T: TypePath> {
    fn from_type() -> Self;
}
