use alloc::boxed::Box;
use core::any::TypeId;
use core::ops::Deref;

use cp_utils::TypeIdMap;

use crate::info::{TypePath, TypePathTable};
use crate::registry::TypeTrait;

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime storage for type metadata, registered into the [`TypeRegistry`].
///
/// This includes a [`TypePathTable`] and a [`TypeTrait`] table.
///
/// An instance of `TypeMeta` can be created using the [`TypeMeta::of`]
/// method, but is more often automatically generated using
/// [`#[derive(Object)]`](crate::derive::Object), which generates
/// an implementation of the [`GetTypeMeta`] trait.
///
/// [`TypeRegistry`]: crate::registry::TypeRegistry
pub struct TypeMeta {
    type_id: TypeId,
    path: TypePathTable,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// Create a empty [`TypeMeta`] from a type.
    #[inline]
    pub fn of<T: TypePath>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            path: TypePathTable::of::<T>(),
            trait_table: TypeIdMap::new(),
        }
    }

    /// Create a empty [`TypeMeta`] from a type with capacity.
    #[inline]
    pub fn with_capacity<T: TypePath>(capacity: usize) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            path: TypePathTable::of::<T>(),
            trait_table: TypeIdMap::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline(always)]
    pub const fn path_table(&self) -> &TypePathTable {
        &self.path
    }

    /// See [`TypePath::type_path`].
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.path.path()
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.path.name()
    }

    /// See [`TypePath::module_path`].
    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        self.path.module_path()
    }

    /// Insert a new [`TypeTrait`].
    #[inline(always)]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.insert_trait_by_id(TypeId::of::<T>(), Box::new(data));
    }

    /// Block code inline.
    #[inline(never)]
    fn insert_trait_by_id(&mut self, id: TypeId, val: Box<dyn TypeTrait>) {
        self.trait_table.insert(id, val);
    }

    /// Get a [`TypeTrait`] reference, or return `None` if it's doesn't exist.
    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.trait_table
            .get(&TypeId::of::<T>())
            .map(Deref::deref)
            .and_then(<dyn TypeTrait>::downcast_ref)
    }

    /// Return true if specific [`TypeTrait`] is exist.
    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    /// Return the number of [`TypeTrait`].
    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut trait_table = TypeIdMap::with_capacity(self.trait_len());
        for (id, type_trait) in self.trait_table.iter() {
            trait_table.insert(*id, (**type_trait).clone_type_trait());
        }

        Self {
            type_id: self.type_id,
            path: self.path,
            trait_table,
        }
    }
}

impl core::fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_path", &self.path)
            .field("trait_len", &self.trait_len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// A trait which allows a type to generate its [`TypeMeta`]
/// for registration into the [`TypeRegistry`].
///
/// This trait is automatically implemented for items using
/// [`#[derive(Object)]`](crate::derive::Object), together with
/// the type traits matching the chosen construction.
///
/// # Implementation
///
/// ```
/// use cp_reflect::derive::Object;
/// use cp_reflect::registry::{GetTypeMeta, TypeTraitAllocate, TypeTraitConstruct};
///
/// #[derive(Object, Default, Clone)]
/// struct A;
///
/// let meta = A::get_type_meta();
/// assert!(meta.has_trait::<TypeTraitAllocate>());
/// assert!(meta.has_trait::<TypeTraitConstruct>());
/// ```
///
/// [`TypeRegistry`]: crate::registry::TypeRegistry
pub trait GetTypeMeta: TypePath {
    fn get_type_meta() -> TypeMeta;
}
